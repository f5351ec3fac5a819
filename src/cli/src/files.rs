use std::{fs, path::Path};

use color_eyre::eyre::{WrapErr, eyre};
use cube_state::{Color, CubeState, Facelet, Notation, SolverRequest};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// On-disk form of a cube: one string of solver codes per face, `.` for an unpainted sticker.
/// Whitespace is ignored, so a face may be written as `"BYR WOR OWB"`.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    front: String,
    back: String,
    left: String,
    right: String,
    top: String,
    bottom: String,
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

fn parse_face(name: &str, stickers: &str) -> color_eyre::Result<Vec<Facelet>> {
    stickers
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => Ok(None),
            _ => Color::from_code(c.to_ascii_uppercase())
                .map(Some)
                .ok_or_else(|| eyre!("The {name} face has an unknown sticker `{c}`")),
        })
        .collect()
}

fn format_face(facelets: &[Facelet]) -> String {
    facelets
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|facelet| facelet.map_or('.', Color::code))
                .collect::<String>()
        })
        .join(" ")
}

/// Parses a state file's contents. The result may still have faces of the wrong length; that is
/// for the caller (and ultimately the codec) to reject.
pub fn parse_state(text: &str, toml: bool) -> color_eyre::Result<CubeState> {
    let file: StateFile = if toml {
        toml::from_str(text)?
    } else {
        serde_json::from_str(text)?
    };

    Ok(CubeState {
        front: parse_face("front", &file.front)?,
        back: parse_face("back", &file.back)?,
        left: parse_face("left", &file.left)?,
        right: parse_face("right", &file.right)?,
        top: parse_face("top", &file.top)?,
        bottom: parse_face("bottom", &file.bottom)?,
    })
}

pub fn format_state(state: &CubeState, toml: bool) -> color_eyre::Result<String> {
    let file = StateFile {
        front: format_face(&state.front),
        back: format_face(&state.back),
        left: format_face(&state.left),
        right: format_face(&state.right),
        top: format_face(&state.top),
        bottom: format_face(&state.bottom),
    };

    Ok(if toml {
        toml::to_string(&file)?
    } else {
        serde_json::to_string_pretty(&file)?
    })
}

pub fn load_state(path: &Path) -> color_eyre::Result<CubeState> {
    let text = fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {path:?}"))?;
    let state =
        parse_state(&text, is_toml(path)).wrap_err_with(|| format!("Failed to parse {path:?}"))?;

    state.check_shape()?;

    Ok(state)
}

pub fn save_state(path: &Path, state: &CubeState) -> color_eyre::Result<()> {
    fs::write(path, format_state(state, is_toml(path))?)
        .wrap_err_with(|| format!("Failed to write {path:?}"))
}

/// Accepts either a full request body (`{"rubiks_cube": {...}}`) or the bare notation.
pub fn parse_notation(text: &str) -> color_eyre::Result<Notation> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    if value.get("rubiks_cube").is_some() {
        Ok(serde_json::from_value::<SolverRequest>(value)?.rubiks_cube)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

pub fn load_notation(path: &Path) -> color_eyre::Result<Notation> {
    let text = fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {path:?}"))?;
    parse_notation(&text).wrap_err_with(|| format!("Failed to parse {path:?}"))
}

#[cfg(test)]
mod tests {
    use cube_state::{Color, CubeState, Face, encode};

    use super::{format_state, parse_notation, parse_state};

    const SAMPLE_TOML: &str = r#"
front = "BYR WOR OWB"
back = "YRW BRO ROG"
left = "OGY GGR YWW"
right = "WBB YBR RBG"
top = "GGO YYY ROG"
bottom = "BBW GWO OWY"
"#;

    #[test]
    fn parse_toml_state() {
        let state = parse_state(SAMPLE_TOML, true).unwrap();

        assert_eq!(state.front[0], Some(Color::Blue));
        assert_eq!(state.bottom[8], Some(Color::Yellow));
        assert!(state.is_complete());
    }

    #[test]
    fn json_round_trip_with_blanks() {
        let mut state = CubeState::solved();
        state.clear(Face::Top, 0).unwrap();

        let json = format_state(&state, false).unwrap();
        assert!(json.contains(r#""top": ".YY YYY YYY""#));
        assert_eq!(parse_state(&json, false).unwrap(), state);
    }

    #[test]
    fn bad_sticker() {
        let text = SAMPLE_TOML.replace("BYR", "BXR");
        assert!(parse_state(&text, true).is_err());
    }

    #[test]
    fn short_face_parses_but_is_malformed() {
        let text = SAMPLE_TOML.replace("BYR WOR OWB", "BYR WOR");
        let state = parse_state(&text, true).unwrap();

        assert!(state.check_shape().is_err());
    }

    #[test]
    fn notation_with_or_without_wrapper() {
        let notation = encode(&CubeState::solved()).unwrap();
        let bare = serde_json::to_string(&notation).unwrap();
        let wrapped = format!(r#"{{"rubiks_cube": {bare}}}"#);

        assert_eq!(parse_notation(&bare).unwrap(), notation);
        assert_eq!(parse_notation(&wrapped).unwrap(), notation);
    }
}
