use std::{io, process::ExitStatus};

use clap::ValueEnum;
use cube_state::{SolverRequest, SolverResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the service's solvers to ask.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Layer by layer, the beginner's method
    #[default]
    Lbl,
    /// Kociemba's two-phase algorithm
    Kociemba,
}

impl Algorithm {
    /// Path of this solver's endpoint relative to the service's base URL.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Algorithm::Lbl => "solve/",
            Algorithm::Kociemba => "solve-kociemba/",
        }
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("Failed to exchange data with the solver: {0}")]
    Io(#[from] io::Error),
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("The solver's reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The solve was abandoned before a reply arrived")]
    Disconnected,
}

/// Something that can take a cube to a solver and bring back its answer.
pub trait SolverService: Send + Sync {
    fn solve(
        &self,
        algorithm: Algorithm,
        request: &SolverRequest,
    ) -> Result<SolverResponse, TransportError>;
}
