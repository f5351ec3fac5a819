use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Color, CubeState, Face, Facelet, MalformedFace};

/// What a face scanner reports: one color name per sticker, row-major, with `"Unknown"` (or any
/// other unrecognised name) for stickers it could not classify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub colors: Vec<String>,
}

impl ScanReply {
    /// Unrecognised names become unpainted facelets so the user can fix them by hand.
    #[must_use]
    pub fn facelets(&self) -> Vec<Facelet> {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, name)| match name.parse::<Color>() {
                Ok(color) => Some(color),
                Err(e) => {
                    warn!(target: "scan", "Sticker {i}: {e}");
                    None
                }
            })
            .collect()
    }

    /// Replaces `face` with the scanned stickers, returning how many of them were unrecognised.
    /// Nothing changes if the scanner did not report exactly nine stickers.
    pub fn apply_to(&self, state: &mut CubeState, face: Face) -> Result<usize, MalformedFace> {
        let facelets = self.facelets();
        let unrecognised = facelets.iter().filter(|f| f.is_none()).count();

        state.replace_face(face, facelets)?;

        Ok(unrecognised)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Color, CubeState, Face, MalformedFace, ScanReply};

    fn reply(colors: &[&str]) -> ScanReply {
        ScanReply {
            message: Some("Scanned Result".to_owned()),
            colors: colors.iter().map(|&c| c.to_owned()).collect(),
        }
    }

    #[test]
    fn applies_scanned_face() {
        let mut state = CubeState::blank();
        let scan = reply(&[
            "white", "red", "Unknown", "green", "green", "blue", "yellow", "orange", "white",
        ]);

        assert_eq!(scan.apply_to(&mut state, Face::Left), Ok(1));
        assert_eq!(state.left[0], Some(Color::White));
        assert_eq!(state.left[2], None);
        assert_eq!(state.left[8], Some(Color::White));
    }

    #[test]
    fn short_scan_is_rejected() {
        let mut state = CubeState::solved();
        let scan = reply(&["white"; 6]);

        assert_eq!(
            scan.apply_to(&mut state, Face::Top),
            Err(MalformedFace {
                face: Face::Top,
                len: 6
            })
        );
        assert_eq!(state, CubeState::solved());
    }

    #[test]
    fn parses_scanner_json() {
        let scan: ScanReply =
            serde_json::from_str(r#"{"message": "Scanned Result", "colors": ["red", "blue"]}"#)
                .unwrap();

        assert_eq!(scan.facelets(), [Some(Color::Red), Some(Color::Blue)]);
    }
}
