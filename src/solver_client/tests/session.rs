use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crossbeam_channel::{Receiver, Sender, bounded};
use cube_state::{
    CodecError, Color, CubeState, Face, Outcome, ScanReply, SolverRequest, SolverResponse, decode,
};
use solver_client::{Algorithm, Session, SessionError, SolverService, TransportError};

/// Replies with a fixed response and remembers every request it was given.
struct Scripted {
    response: SolverResponse,
    seen: Mutex<Vec<(Algorithm, SolverRequest)>>,
}

impl Scripted {
    fn new(response: serde_json::Value) -> Arc<Scripted> {
        Arc::new(Scripted {
            response: serde_json::from_value(response).unwrap(),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl SolverService for Scripted {
    fn solve(
        &self,
        algorithm: Algorithm,
        request: &SolverRequest,
    ) -> Result<SolverResponse, TransportError> {
        self.seen.lock().unwrap().push((algorithm, request.clone()));
        Ok(self.response.clone())
    }
}

/// Holds every solve until the test releases it.
struct Gated {
    gate: Receiver<Result<SolverResponse, TransportError>>,
}

impl Gated {
    fn new() -> (Arc<Gated>, Sender<Result<SolverResponse, TransportError>>) {
        let (tx, rx) = bounded(4);
        (Arc::new(Gated { gate: rx }), tx)
    }
}

impl SolverService for Gated {
    fn solve(&self, _: Algorithm, _: &SolverRequest) -> Result<SolverResponse, TransportError> {
        self.gate.recv().unwrap_or(Err(TransportError::Disconnected))
    }
}

#[test_log::test]
fn paint_with_brush() {
    let mut session = Session::default();
    assert_eq!(session.brush(), Color::White);

    session.select_color(Color::Green);
    session.paint(Face::Left, 4).unwrap();
    session.paint(Face::Left, 0).unwrap();
    session.select_color(Color::Red);
    session.paint(Face::Left, 0).unwrap();

    assert_eq!(session.cube().left[4], Some(Color::Green));
    assert_eq!(session.cube().left[0], Some(Color::Red));
    assert!(session.paint(Face::Left, 9).is_err());

    session.clear(Face::Left, 0).unwrap();
    assert_eq!(session.cube().left[0], None);
}

#[test_log::test]
fn submit_sends_the_encoded_cube() {
    let service = Scripted::new(serde_json::json!({ "sequence": ["r", "r", "u'"] }));
    let mut session = Session::new(CubeState::solved());

    session.submit(service.clone(), Algorithm::Kociemba).unwrap();
    assert!(session.is_pending());

    let outcome = session.wait().unwrap().unwrap().clone();
    assert_eq!(outcome.to_string(), "Solved in 3 moves: R R U'");
    assert_eq!(session.outcome(), Some(&outcome));
    assert!(!session.is_pending());

    let seen = service.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, Algorithm::Kociemba);
    assert_eq!(decode(&seen[0].1.rubiks_cube).unwrap(), CubeState::solved());
}

#[test_log::test]
fn reply_is_applied_exactly_once() {
    let service = Scripted::new(serde_json::json!({ "sequence": [] }));
    let mut session = Session::new(CubeState::solved());

    session.submit(service, Algorithm::Lbl).unwrap();
    assert!(matches!(session.wait(), Some(Ok(Outcome::AlreadySolved))));

    assert!(session.wait().is_none());
    assert!(session.poll().is_none());
    assert_eq!(session.outcome(), Some(&Outcome::AlreadySolved));
}

#[test_log::test]
fn incomplete_cube_is_not_sent() {
    let service = Scripted::new(serde_json::json!({ "sequence": [] }));
    let mut session = Session::default();

    assert!(matches!(
        session.submit(service.clone(), Algorithm::Lbl),
        Err(SessionError::Codec(CodecError::UnknownColor { .. }))
    ));
    assert!(!session.is_pending());
    assert!(service.seen.lock().unwrap().is_empty());
}

#[test_log::test]
fn rejection_is_an_outcome() {
    let service = Scripted::new(serde_json::json!({
        "non_field_errors": ["The corner pieces are incorrect."]
    }));
    let mut session = Session::new(CubeState::solved());

    session.submit(service, Algorithm::Lbl).unwrap();

    assert_eq!(
        session.wait().unwrap().unwrap(),
        &Outcome::Rejected(vec!["The corner pieces are incorrect.".to_owned()])
    );
}

#[test_log::test]
fn poll_does_not_block() {
    let (service, release) = Gated::new();
    let mut session = Session::new(CubeState::solved());

    session.submit(service, Algorithm::Lbl).unwrap();
    assert!(session.poll().is_none());
    assert!(session.is_pending());

    // Edits keep working while the solve is in flight
    session.select_color(Color::Blue);
    session.paint(Face::Front, 0).unwrap();

    release
        .send(Ok(serde_json::from_str(r#"{"sequence": ["f"]}"#).unwrap()))
        .unwrap();

    let outcome = loop {
        if let Some(result) = session.poll() {
            break result.unwrap().clone();
        }
        std::thread::sleep(Duration::from_millis(5));
    };

    assert!(matches!(outcome, Outcome::Solved(s) if s.len() == 1));
}

#[test_log::test]
fn newer_submission_replaces_older() {
    let (service, release) = Gated::new();
    let mut session = Session::new(CubeState::solved());

    session.submit(service.clone(), Algorithm::Lbl).unwrap();
    session.submit(service, Algorithm::Kociemba).unwrap();

    // Both workers are waiting on the same gate; whichever takes the first reply, only the
    // second submission's channel is listened to
    release
        .send(Ok(serde_json::from_str(r#"{"sequence": []}"#).unwrap()))
        .unwrap();
    release
        .send(Ok(serde_json::from_str(r#"{"sequence": []}"#).unwrap()))
        .unwrap();

    assert!(matches!(session.wait(), Some(Ok(Outcome::AlreadySolved))));
    assert!(session.wait().is_none());
}

#[test_log::test]
fn transport_failure() {
    let (service, release) = Gated::new();
    let mut session = Session::new(CubeState::solved());

    session.submit(service, Algorithm::Lbl).unwrap();
    release.send(Err(TransportError::Disconnected)).unwrap();

    assert!(matches!(
        session.wait(),
        Some(Err(SessionError::Transport(TransportError::Disconnected)))
    ));
    assert!(session.outcome().is_none());
    assert!(!session.is_pending());
}

#[test_log::test]
fn scan_replaces_a_face() {
    let mut session = Session::new(CubeState::solved());
    let scan: ScanReply = serde_json::from_value(serde_json::json!({
        "message": "Scanned Result",
        "colors": ["red", "red", "red", "red", "red", "red", "red", "red", "Unknown"],
    }))
    .unwrap();

    assert_eq!(session.apply_scan(Face::Front, &scan), Ok(1));
    assert_eq!(session.cube().front[0], Some(Color::Red));
    assert_eq!(session.cube().front[8], None);

    assert!(session.replace_face(Face::Front, vec![None; 3]).is_err());
}
