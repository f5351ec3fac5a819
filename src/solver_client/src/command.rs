use std::{
    io::Write,
    process::{Command, Stdio},
};

use cube_state::{SolverRequest, SolverResponse};
use log::{debug, trace};

use crate::{Algorithm, ClientConfig, SolverService, TransportError};

/// Reaches the solving service through an external program, `curl` unless configured otherwise.
///
/// The program is run as `program args... <endpoint url>` with the JSON request on stdin, and
/// whatever it writes to stdout is parsed as the JSON reply.
#[derive(Debug, Clone)]
pub struct CommandSolver {
    config: ClientConfig,
}

impl CommandSolver {
    #[must_use]
    pub fn new(config: ClientConfig) -> CommandSolver {
        CommandSolver { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl SolverService for CommandSolver {
    fn solve(
        &self,
        algorithm: Algorithm,
        request: &SolverRequest,
    ) -> Result<SolverResponse, TransportError> {
        let url = self.config.endpoint_url(algorithm);
        let body = serde_json::to_vec(request)?;

        debug!(target: "solver", "POST {url} via {}", self.config.program);

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(&url)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TransportError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        // The request is far smaller than a pipe buffer, so writing it all before reading can't
        // deadlock. Dropping stdin closes it.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&body)?;
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(TransportError::Failed {
                program: self.config.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        trace!(target: "solver", "Reply: {}", String::from_utf8_lossy(&output.stdout));

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
