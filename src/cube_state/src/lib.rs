//! The cube state a user paints and its translation to and from the notation the solving service
//! accepts.

mod codec;
mod color;
mod face;
mod facelet_string;
mod moves;
mod notation;
mod response;
mod scan;
mod state;
mod validate;

pub use codec::{CodecError, decode, encode};
pub use color::{Color, Facelet, UnknownColorName};
pub use face::{Face, UnknownFace};
pub use facelet_string::{FACELET_STRING_ORDER, FaceletStringError, to_facelet_string};
pub use moves::{InvalidMove, Move, Solution, parse_moves};
pub use notation::{FaceletKey, InvalidFaceletKey, Notation};
pub use response::{Outcome, SolverRequest, SolverResponse};
pub use scan::ScanReply;
pub use state::{CubeState, EditError, FACELETS_PER_FACE, MalformedFace};
pub use validate::{ValidationError, validate};
