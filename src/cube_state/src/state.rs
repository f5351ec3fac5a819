use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, Face, Facelet};

pub const FACELETS_PER_FACE: usize = 9;

/// The editable sticker grid. Each face is stored row-major, index 0 is the top left sticker.
///
/// Every mutation made through the methods below keeps each face at exactly nine facelets. The
/// fields are public so that a capture source can hand over whatever it produced; the codec
/// re-checks the shape before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeState {
    pub front: Vec<Facelet>,
    pub back: Vec<Facelet>,
    pub left: Vec<Facelet>,
    pub right: Vec<Facelet>,
    pub top: Vec<Facelet>,
    pub bottom: Vec<Facelet>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The {face} face must have exactly 9 facelets but has {len}")]
pub struct MalformedFace {
    pub face: Face,
    pub len: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Facelet index {index} is out of range for the {face} face, expected 0 to 8")]
    FaceletOutOfRange { face: Face, index: usize },
    #[error(transparent)]
    Malformed(#[from] MalformedFace),
}

impl CubeState {
    /// A cube with every facelet unpainted.
    #[must_use]
    pub fn blank() -> CubeState {
        CubeState::from_fn(|_, _| None)
    }

    /// Every face painted in its center color: orange front, red back, green left, blue right,
    /// yellow top and white bottom.
    #[must_use]
    pub fn solved() -> CubeState {
        CubeState::from_fn(|face, _| Some(CubeState::solved_color(face)))
    }

    #[must_use]
    pub fn solved_color(face: Face) -> Color {
        match face {
            Face::Front => Color::Orange,
            Face::Back => Color::Red,
            Face::Left => Color::Green,
            Face::Right => Color::Blue,
            Face::Top => Color::Yellow,
            Face::Bottom => Color::White,
        }
    }

    /// Builds a well formed state by asking `f` for the facelet at each `(face, index)`.
    pub fn from_fn(mut f: impl FnMut(Face, usize) -> Facelet) -> CubeState {
        let mut face = |face: Face| -> Vec<Facelet> {
            (0..FACELETS_PER_FACE).map(|i| f(face, i)).collect()
        };

        CubeState {
            front: face(Face::Front),
            back: face(Face::Back),
            left: face(Face::Left),
            right: face(Face::Right),
            top: face(Face::Top),
            bottom: face(Face::Bottom),
        }
    }

    #[must_use]
    pub fn face(&self, face: Face) -> &[Facelet] {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
            Face::Left => &self.left,
            Face::Right => &self.right,
            Face::Top => &self.top,
            Face::Bottom => &self.bottom,
        }
    }

    fn face_mut(&mut self, face: Face) -> &mut Vec<Facelet> {
        match face {
            Face::Front => &mut self.front,
            Face::Back => &mut self.back,
            Face::Left => &mut self.left,
            Face::Right => &mut self.right,
            Face::Top => &mut self.top,
            Face::Bottom => &mut self.bottom,
        }
    }

    pub fn faces(&self) -> impl Iterator<Item = (Face, &[Facelet])> {
        Face::ALL.into_iter().map(|face| (face, self.face(face)))
    }

    #[must_use]
    pub fn facelet(&self, face: Face, index: usize) -> Option<Facelet> {
        self.face(face).get(index).copied()
    }

    /// Sets one facelet, the equivalent of clicking a sticker with the current paint color.
    pub fn set(&mut self, face: Face, index: usize, facelet: Facelet) -> Result<(), EditError> {
        if index >= FACELETS_PER_FACE {
            return Err(EditError::FaceletOutOfRange { face, index });
        }

        self.check_face(face)?;
        self.face_mut(face)[index] = facelet;

        Ok(())
    }

    pub fn paint(&mut self, face: Face, index: usize, color: Color) -> Result<(), EditError> {
        self.set(face, index, Some(color))
    }

    pub fn clear(&mut self, face: Face, index: usize) -> Result<(), EditError> {
        self.set(face, index, None)
    }

    /// Bulk replaces a face, e.g. with the result of a scan. The state is left untouched if the
    /// new face does not have exactly nine facelets.
    pub fn replace_face(&mut self, face: Face, facelets: Vec<Facelet>) -> Result<(), MalformedFace> {
        if facelets.len() != FACELETS_PER_FACE {
            return Err(MalformedFace {
                face,
                len: facelets.len(),
            });
        }

        *self.face_mut(face) = facelets;

        Ok(())
    }

    fn check_face(&self, face: Face) -> Result<(), MalformedFace> {
        let len = self.face(face).len();
        if len == FACELETS_PER_FACE {
            Ok(())
        } else {
            Err(MalformedFace { face, len })
        }
    }

    /// Checks the per-face length invariant, reporting the first face in solver order that
    /// breaks it.
    pub fn check_shape(&self) -> Result<(), MalformedFace> {
        Face::ALL
            .into_iter()
            .try_for_each(|face| self.check_face(face))
    }

    /// Whether every facelet has been painted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.faces().all(|(_, facelets)| facelets.iter().all(Option::is_some))
    }

    /// Number of facelets painted with `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.faces()
            .flat_map(|(_, facelets)| facelets.iter())
            .filter(|facelet| **facelet == Some(color))
            .count()
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::blank()
    }
}
