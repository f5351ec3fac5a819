use log::debug;
use thiserror::Error;

use crate::{
    Color, CubeState, FaceletKey, MalformedFace, Notation, state::FACELETS_PER_FACE,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(transparent)]
    MalformedFace(#[from] MalformedFace),
    #[error("Facelet {key} is not painted with a known color")]
    UnknownColor { key: FaceletKey },
    #[error("The notation is missing facelet {key}")]
    MissingKey { key: FaceletKey },
    #[error("Facelet {key} has the unknown color code `{code}`")]
    UnknownCode { key: FaceletKey, code: String },
}

/// Converts a cube state into the solver's 54-key notation.
pub fn encode(state: &CubeState) -> Result<Notation, CodecError> {
    state.check_shape()?;

    let mut notation = Notation::new();

    for key in FaceletKey::all() {
        let color = state.face(key.face())[key.index()].ok_or(CodecError::UnknownColor { key })?;
        notation.insert(key, color.code());
    }

    debug!(target: "codec", "Encoded {} facelets", notation.len());

    Ok(notation)
}

/// Rebuilds a cube state from the solver's notation. Keys other than the 54 facelet keys are
/// ignored.
pub fn decode(notation: &Notation) -> Result<CubeState, CodecError> {
    // In `FaceletKey::all` order, so face `f` index `i` lives at `f * 9 + i`
    let colors = FaceletKey::all()
        .map(|key| {
            let code = notation.get(key).ok_or(CodecError::MissingKey { key })?;
            parse_code(code).ok_or_else(|| CodecError::UnknownCode {
                key,
                code: code.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if notation.len() > colors.len() {
        debug!(target: "codec", "Ignored {} unexpected keys", notation.len() - colors.len());
    }

    Ok(CubeState::from_fn(|face, index| {
        Some(colors[face as usize * FACELETS_PER_FACE + index])
    }))
}

fn parse_code(code: &str) -> Option<Color> {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Color::from_code(c),
        _ => None,
    }
}
