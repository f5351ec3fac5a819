use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use cube_state::{
    CodecError, Color, CubeState, EditError, Face, Facelet, InvalidMove, MalformedFace, Outcome,
    ScanReply, SolverRequest, SolverResponse,
};
use log::{debug, info, warn};
use thiserror::Error;

use crate::{Algorithm, SolverService, TransportError};

type Reply = Result<SolverResponse, TransportError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("The solver replied with an unreadable move: {0}")]
    BadReply(#[from] InvalidMove),
}

/// Everything the user is working on: the painted cube, the color on the brush, and the result
/// of the last solve.
///
/// A session is owned by whatever drives the interaction and all edits go through it. A solve runs
/// on a worker thread; its reply is applied exactly once, by [`Session::poll`] or
/// [`Session::wait`].
pub struct Session {
    cube: CubeState,
    brush: Color,
    outcome: Option<Outcome>,
    pending: Option<(Algorithm, Receiver<Reply>)>,
}

impl Session {
    #[must_use]
    pub fn new(cube: CubeState) -> Session {
        Session {
            cube,
            brush: Color::White,
            outcome: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    #[must_use]
    pub fn brush(&self) -> Color {
        self.brush
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn select_color(&mut self, color: Color) {
        self.brush = color;
    }

    /// Paints one facelet with the brush color.
    pub fn paint(&mut self, face: Face, index: usize) -> Result<(), EditError> {
        self.cube.paint(face, index, self.brush)
    }

    pub fn clear(&mut self, face: Face, index: usize) -> Result<(), EditError> {
        self.cube.clear(face, index)
    }

    pub fn replace_face(&mut self, face: Face, facelets: Vec<Facelet>) -> Result<(), MalformedFace> {
        self.cube.replace_face(face, facelets)
    }

    /// Takes over a scanned face. Returns the number of stickers the scanner could not read.
    pub fn apply_scan(&mut self, face: Face, scan: &ScanReply) -> Result<usize, MalformedFace> {
        let unrecognised = scan.apply_to(&mut self.cube, face)?;
        if unrecognised > 0 {
            warn!(target: "session", "{unrecognised} stickers on the {face} face need painting by hand");
        }
        Ok(unrecognised)
    }

    pub fn replace_cube(&mut self, cube: CubeState) {
        self.cube = cube;
    }

    /// Encodes the current cube and hands it to `service` on a worker thread.
    ///
    /// Encoding errors are returned right away and nothing is sent. Submitting while another solve
    /// is in flight abandons the older one.
    pub fn submit(
        &mut self,
        service: Arc<dyn SolverService>,
        algorithm: Algorithm,
    ) -> Result<(), SessionError> {
        let request = SolverRequest::new(&self.cube)?;

        let (tx, rx) = bounded(1);

        thread::spawn(move || {
            let reply = service.solve(algorithm, &request);
            if tx.send(reply).is_err() {
                debug!(target: "session", "Dropped the reply of an abandoned solve");
            }
        });

        if self.pending.replace((algorithm, rx)).is_some() {
            debug!(target: "session", "Abandoned the previous solve");
        }

        info!(target: "session", "Submitted the cube to the {algorithm:?} solver");

        Ok(())
    }

    /// Applies the reply of the pending solve if it has arrived. Returns `None` if nothing is
    /// pending or the reply is still on its way.
    pub fn poll(&mut self) -> Option<Result<&Outcome, SessionError>> {
        let reply = match self.pending.as_ref()?.1.try_recv() {
            Ok(reply) => reply,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(TransportError::Disconnected),
        };

        Some(self.apply(reply))
    }

    /// Blocks until the pending solve replies and applies it. Returns `None` if nothing is pending.
    pub fn wait(&mut self) -> Option<Result<&Outcome, SessionError>> {
        let reply = self
            .pending
            .as_ref()?
            .1
            .recv()
            .unwrap_or(Err(TransportError::Disconnected));

        Some(self.apply(reply))
    }

    fn apply(&mut self, reply: Reply) -> Result<&Outcome, SessionError> {
        let algorithm = self.pending.take().map(|(algorithm, _)| algorithm);

        let outcome = reply?.interpret()?;
        debug!(target: "session", "{algorithm:?} solver replied: {outcome}");

        Ok(self.outcome.insert(outcome))
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(CubeState::default())
    }
}
