use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the six sticker colors of a standard cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Yellow,
    Red,
    Orange,
    Blue,
    Green,
}

/// A single sticker. `None` is an unpainted facelet, which is a legal editing state but has no
/// solver code.
pub type Facelet = Option<Color>;

/// The color ↔ solver code bijection. Both directions are looked up here.
const CODE_TABLE: [(Color, char, &str); 6] = [
    (Color::White, 'W', "white"),
    (Color::Yellow, 'Y', "yellow"),
    (Color::Red, 'R', "red"),
    (Color::Orange, 'O', "orange"),
    (Color::Blue, 'B', "blue"),
    (Color::Green, 'G', "green"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color `{0}`, expected one of white, yellow, red, orange, blue, green")]
pub struct UnknownColorName(pub String);

impl Color {
    pub const ALL: [Self; 6] = {
        use Color::*;
        let v = [White, Yellow, Red, Orange, Blue, Green];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            assert!(i == CODE_TABLE[i].0 as usize);
            i += 1;
        }

        v
    };

    /// The single character the solver uses for this color.
    #[must_use]
    pub fn code(self) -> char {
        CODE_TABLE[self as usize].1
    }

    /// Inverse of [`Color::code`].
    #[must_use]
    pub fn from_code(code: char) -> Option<Color> {
        CODE_TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(color, _, _)| *color)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        CODE_TABLE[self as usize].2
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a color name in any case (`"White"`, `"white"`) or its one letter solver code.
impl FromStr for Color {
    type Err = UnknownColorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(color) = Color::from_code(c.to_ascii_uppercase()) {
                return Ok(color);
            }
        }

        CODE_TABLE
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(trimmed))
            .map(|(color, _, _)| *color)
            .ok_or_else(|| UnknownColorName(s.to_owned()))
    }
}
