mod command;
mod config;
mod service;
mod session;

pub use command::CommandSolver;
pub use config::{ClientConfig, ConfigError};
pub use service::{Algorithm, SolverService, TransportError};
pub use session::{Session, SessionError};
