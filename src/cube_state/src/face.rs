use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A side of the cube. The discriminants follow the solver's face order `F B L R U D`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown face `{0}`, expected one of F, B, L, R, U, D")]
pub struct UnknownFace(pub String);

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [Front, Back, Left, Right, Top, Bottom];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// Index of the center sticker within a face.
    pub const CENTER: usize = 4;

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Top => 'U',
            Face::Bottom => 'D',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter.to_ascii_uppercase())
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = UnknownFace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Face::from_letter(c).ok_or_else(|| UnknownFace(s.to_owned()));
        }

        Face::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFace(s.to_owned()))
    }
}
