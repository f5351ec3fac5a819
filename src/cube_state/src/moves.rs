use std::{fmt::Display, str::FromStr, sync::Arc};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Face;

/// A single step of a solution as the solving service writes it: a quarter turn of a face
/// (`f`, `u'`) or a whole cube rotation to the left or right (`rl`, `rr`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    Turn { face: Face, prime: bool },
    RotateLeft,
    RotateRight,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a move")]
pub struct InvalidMove(pub String);

impl Move {
    #[must_use]
    pub fn inverse(self) -> Move {
        match self {
            Move::Turn { face, prime } => Move::Turn {
                face,
                prime: !prime,
            },
            Move::RotateLeft => Move::RotateRight,
            Move::RotateRight => Move::RotateLeft,
        }
    }
}

/// Written lower case, the way moves travel on the wire.
impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Turn { face, prime } => {
                write!(f, "{}", face.letter().to_ascii_lowercase())?;
                if *prime {
                    write!(f, "'")?;
                }
                Ok(())
            }
            Move::RotateLeft => write!(f, "rl"),
            Move::RotateRight => write!(f, "rr"),
        }
    }
}

impl FromStr for Move {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();

        match lower.as_str() {
            "rl" => return Ok(Move::RotateLeft),
            "rr" => return Ok(Move::RotateRight),
            _ => {}
        }

        let (letter, prime) = match lower.strip_suffix('\'') {
            Some(rest) => (rest, true),
            None => (lower.as_str(), false),
        };

        let mut chars = letter.chars();
        match (chars.next().and_then(Face::from_letter), chars.next()) {
            (Some(face), None) => Ok(Move::Turn { face, prime }),
            _ => Err(InvalidMove(s.to_owned())),
        }
    }
}

/// Parses solver tokens, expanding half turns such as `R2` into two quarter turns.
pub fn parse_moves<S: AsRef<str>>(
    tokens: impl IntoIterator<Item = S>,
) -> Result<Vec<Move>, InvalidMove> {
    let mut moves = Vec::new();

    for token in tokens {
        let token = token.as_ref().trim();
        if token.is_empty() {
            continue;
        }

        let (body, prime) = match token.strip_suffix('\'') {
            Some(body) => (body, "'"),
            None => (token, ""),
        };

        match body.strip_suffix('2') {
            Some(quarter) => {
                let mv = format!("{quarter}{prime}")
                    .parse::<Move>()
                    .map_err(|_| InvalidMove(token.to_owned()))?;
                moves.extend([mv, mv]);
            }
            None => moves.push(token.parse()?),
        }
    }

    Ok(moves)
}

/// A finished solution. Cloning shares the same moves, which can no longer change once the
/// solution exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Solution(Arc<[Move]>);

impl Solution {
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The moves that undo this solution, i.e. a scramble that produces the original state from a
    /// solved cube.
    #[must_use]
    pub fn inverse(&self) -> Solution {
        self.0.iter().rev().map(|mv| mv.inverse()).collect()
    }
}

impl FromIterator<Move> for Solution {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Solution(iter.into_iter().collect())
    }
}

impl TryFrom<Vec<String>> for Solution {
    type Error = InvalidMove;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        parse_moves(value).map(Solution::from_iter)
    }
}

impl From<Solution> for Vec<String> {
    fn from(value: Solution) -> Self {
        value.0.iter().map(ToString::to_string).collect()
    }
}

/// Upper case and space separated, e.g. `F U' RL`.
impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|mv| mv.to_string().to_ascii_uppercase())
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Face, Move, Solution, parse_moves};

    #[test]
    fn parse_tokens() {
        assert_eq!(
            "u'".parse::<Move>(),
            Ok(Move::Turn {
                face: Face::Top,
                prime: true
            })
        );
        assert_eq!(
            "F".parse::<Move>(),
            Ok(Move::Turn {
                face: Face::Front,
                prime: false
            })
        );
        assert_eq!("rl".parse::<Move>(), Ok(Move::RotateLeft));
        assert_eq!("RR".parse::<Move>(), Ok(Move::RotateRight));

        for bad in ["", "x", "ff", "'", "r''", "u2"] {
            assert!(bad.parse::<Move>().is_err(), "{bad}");
        }
    }

    #[test]
    fn wire_form_round_trips() {
        for token in ["f", "b'", "l", "r'", "u", "d'", "rl", "rr"] {
            assert_eq!(token.parse::<Move>().unwrap().to_string(), token);
        }
    }

    #[test]
    fn half_turns_expand() {
        let moves = parse_moves(["R2", "U'", "f2'"]).unwrap();
        assert_eq!(
            moves.iter().map(ToString::to_string).collect_vec(),
            ["r", "r", "u'", "f'", "f'"]
        );

        assert!(parse_moves(["q2"]).is_err());
    }

    #[test]
    fn display_is_upper_case() {
        let solution: Solution = parse_moves(["f", "u'", "rl"]).unwrap().into_iter().collect();
        assert_eq!(solution.to_string(), "F U' RL");
        assert_eq!(solution.len(), 3);
    }

    #[test]
    fn inverse() {
        let solution: Solution = parse_moves(["f", "u'", "rl"]).unwrap().into_iter().collect();
        assert_eq!(solution.inverse().to_string(), "RR U F'");
        assert_eq!(solution.inverse().inverse(), solution);
    }
}
