//! A local structural check of a complete notation, matching what the solving service rejects.
//!
//! The codec never runs this on its own; an incomplete or impossible cube is still a legal
//! editing state. It exists so that obviously wrong input can be reported before a round trip to
//! the solver.

use std::collections::BTreeSet;

use itertools::Itertools;
use thiserror::Error;

use crate::{FaceletKey, Notation};

const CENTERS: [&str; 6] = ["F5", "L5", "R5", "B5", "U5", "D5"];

/// Each edge as `(facelets, the centers those facelets must match)`.
const EDGES: [([&str; 2], [&str; 2]); 12] = [
    (["F4", "L6"], ["F5", "L5"]),
    (["F6", "R4"], ["F5", "R5"]),
    (["F2", "U8"], ["F5", "U5"]),
    (["F8", "D2"], ["F5", "D5"]),
    (["B4", "R6"], ["R5", "B5"]),
    (["B6", "L4"], ["L5", "B5"]),
    (["B2", "U2"], ["B5", "U5"]),
    (["B8", "D8"], ["B5", "D5"]),
    (["R2", "U6"], ["R5", "U5"]),
    (["R8", "D6"], ["R5", "D5"]),
    (["L2", "U4"], ["L5", "U5"]),
    (["L8", "D4"], ["L5", "D5"]),
];

const CORNERS: [([&str; 3], [&str; 3]); 8] = [
    (["F1", "L3", "U7"], ["F5", "L5", "U5"]),
    (["F7", "L9", "D1"], ["F5", "L5", "D5"]),
    (["F3", "R1", "U9"], ["F5", "R5", "U5"]),
    (["F9", "R7", "D3"], ["F5", "R5", "D5"]),
    (["B3", "L1", "U1"], ["B5", "L5", "U5"]),
    (["B9", "L7", "D7"], ["B5", "L5", "D5"]),
    (["B1", "R3", "U3"], ["B5", "R5", "U5"]),
    (["B7", "R9", "D9"], ["B5", "R5", "D5"]),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing one or more center facelets.")]
    MissingCenters,
    #[error("There must be 6 distinct center colors.")]
    DuplicateCenterColors,
    #[error("Missing facelet key: {0}")]
    MissingKey(FaceletKey),
    #[error(
        "Each color must appear exactly 9 times. Incorrect counts: {}",
        .0.iter().map(|(code, count)| format!("{code}: {count}")).join(", ")
    )]
    WrongColorCounts(Vec<(String, usize)>),
    #[error("The side (edge) pieces are incorrect.")]
    BadEdges,
    #[error("The corner pieces are incorrect.")]
    BadCorners,
}

/// Checks, in order: centers present, centers distinct, nine stickers of every color, edge
/// pieces consistent with the centers, corner pieces consistent with the centers.
///
/// Edges and corners are compared as unordered sets of sticker sets, so a flipped edge or a
/// twisted corner is not detected.
pub fn validate(notation: &Notation) -> Result<(), ValidationError> {
    let centers = CENTERS
        .iter()
        .map(|key| notation.get_raw(key))
        .collect::<Option<Vec<_>>>()
        .ok_or(ValidationError::MissingCenters)?;

    if !centers.iter().all_unique() {
        return Err(ValidationError::DuplicateCenterColors);
    }

    let codes = FaceletKey::all()
        .map(|key| notation.get(key).ok_or(ValidationError::MissingKey(key)))
        .collect::<Result<Vec<_>, _>>()?;

    let wrong_counts = codes
        .into_iter()
        .counts()
        .into_iter()
        .filter(|(_, count)| *count != 9)
        .map(|(code, count)| (code.to_owned(), count))
        .sorted()
        .collect_vec();

    if !wrong_counts.is_empty() {
        return Err(ValidationError::WrongColorCounts(wrong_counts));
    }

    if !pieces_match(notation, &EDGES) {
        return Err(ValidationError::BadEdges);
    }

    if !pieces_match(notation, &CORNERS) {
        return Err(ValidationError::BadCorners);
    }

    Ok(())
}

/// All keys are known to be present by the time this runs.
fn pieces_match<const N: usize>(notation: &Notation, pieces: &[([&str; N], [&str; N])]) -> bool {
    let actual: BTreeSet<_> = pieces
        .iter()
        .map(|(stickers, _)| sticker_set(notation, stickers))
        .collect();
    let needed: BTreeSet<_> = pieces
        .iter()
        .map(|(_, centers)| sticker_set(notation, centers))
        .collect();

    actual == needed
}

fn sticker_set<'a>(notation: &'a Notation, keys: &[&str]) -> BTreeSet<&'a str> {
    keys.iter().filter_map(|key| notation.get_raw(key)).collect()
}
