use std::collections::HashMap;

use thiserror::Error;

use crate::{Color, CubeState, Face, FaceletKey, MalformedFace};

/// Face order of the 54 character facelet string understood by two-phase solvers.
pub const FACELET_STRING_ORDER: [Face; 6] = [
    Face::Top,
    Face::Right,
    Face::Front,
    Face::Bottom,
    Face::Left,
    Face::Back,
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletStringError {
    #[error(transparent)]
    Malformed(#[from] MalformedFace),
    #[error("The center of the {0} face is not painted")]
    UnpaintedCenter(Face),
    #[error("The {0} and {1} faces have the same center color")]
    SharedCenter(Face, Face),
    #[error("Facelet {0} is not painted")]
    Unpainted(FaceletKey),
}

/// Renders the state as a facelet string: faces in `U R F D L B` order, every sticker replaced by
/// the letter of the face whose center has the same color.
///
/// Stickers are relabelled by center rather than by a fixed color scheme, so any orientation in
/// which the cube was painted is accepted.
pub fn to_facelet_string(state: &CubeState) -> Result<String, FaceletStringError> {
    state.check_shape()?;

    let mut center_faces = HashMap::<Color, Face>::new();
    for face in Face::ALL {
        let color = state.face(face)[Face::CENTER].ok_or(FaceletStringError::UnpaintedCenter(face))?;

        if let Some(other) = center_faces.insert(color, face) {
            return Err(FaceletStringError::SharedCenter(other, face));
        }
    }

    let mut out = String::with_capacity(54);

    for face in FACELET_STRING_ORDER {
        for key in FaceletKey::of_face(face) {
            // Six distinct centers cover all six colors, so every painted sticker has a face
            let letter = state.face(face)[key.index()]
                .and_then(|color| center_faces.get(&color))
                .map(|face| face.letter())
                .ok_or(FaceletStringError::Unpainted(key))?;

            out.push(letter);
        }
    }

    Ok(out)
}
