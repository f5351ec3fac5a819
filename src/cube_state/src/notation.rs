use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Face, state::FACELETS_PER_FACE};

/// A facelet address such as `F1` or `D9`: a face letter followed by a 1-based position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceletKey {
    face: Face,
    index: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a facelet key, expected a face letter followed by a position from 1 to 9")]
pub struct InvalidFaceletKey(pub String);

impl FaceletKey {
    /// Returns `None` unless `index` is in `0..9`.
    #[must_use]
    pub fn new(face: Face, index: usize) -> Option<FaceletKey> {
        (index < FACELETS_PER_FACE).then_some(FaceletKey { face, index })
    }

    #[must_use]
    pub fn face(self) -> Face {
        self.face
    }

    /// Zero based index into the face.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// One based position as written in the key.
    #[must_use]
    pub fn position(self) -> usize {
        self.index + 1
    }

    /// All 54 keys, `F1..F9` through `D1..D9`.
    pub fn all() -> impl Iterator<Item = FaceletKey> {
        Face::ALL.into_iter().flat_map(FaceletKey::of_face)
    }

    /// The nine keys of one face, `1` through `9`.
    pub fn of_face(face: Face) -> impl Iterator<Item = FaceletKey> {
        (0..FACELETS_PER_FACE).map(move |index| FaceletKey { face, index })
    }
}

impl Display for FaceletKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.position())
    }
}

impl FromStr for FaceletKey {
    type Err = InvalidFaceletKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidFaceletKey(s.to_owned());

        let mut chars = s.chars();
        let face = chars
            .next()
            .filter(char::is_ascii_uppercase)
            .and_then(Face::from_letter)
            .ok_or_else(err)?;
        let position = chars
            .as_str()
            .parse::<usize>()
            .ok()
            .filter(|v| (1..=FACELETS_PER_FACE).contains(v))
            .ok_or_else(err)?;

        FaceletKey::new(face, position - 1).ok_or_else(err)
    }
}

/// The flat request notation: facelet key → one character color code.
///
/// Keys and codes are kept as raw strings so that a notation received from elsewhere can be
/// represented as-is and rejected by [`crate::decode`] with a precise error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notation(BTreeMap<String, String>);

impl Notation {
    #[must_use]
    pub fn new() -> Notation {
        Notation::default()
    }

    pub fn insert(&mut self, key: FaceletKey, code: char) -> Option<String> {
        self.0.insert(key.to_string(), code.to_string())
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, code: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), code.into())
    }

    #[must_use]
    pub fn get(&self, key: FaceletKey) -> Option<&str> {
        self.0.get(&key.to_string()).map(String::as_str)
    }

    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: FaceletKey) -> Option<String> {
        self.0.remove(&key.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Notation {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Notation(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{Face, FaceletKey, Notation};

    #[test]
    fn all_keys_in_solver_order() {
        let keys = FaceletKey::all().map(|k| k.to_string()).collect_vec();
        assert_eq!(keys.len(), 54);
        assert_eq!(keys[0], "F1");
        assert_eq!(keys[8], "F9");
        assert_eq!(keys[9], "B1");
        assert_eq!(keys[36], "U1");
        assert_eq!(keys[53], "D9");
        assert!(keys.iter().all_unique());
    }

    #[test]
    fn parse_keys() {
        let key = "R4".parse::<FaceletKey>().unwrap();
        assert_eq!(key.face(), Face::Right);
        assert_eq!(key.index(), 3);
        assert_eq!(key.position(), 4);

        for bad in ["R0", "R10", "r4", "X1", "", "U", "U1 "] {
            assert!(bad.parse::<FaceletKey>().is_err(), "{bad}");
        }
    }

    #[test]
    fn key_out_of_range() {
        assert!(FaceletKey::new(Face::Top, 9).is_none());
        assert!(FaceletKey::new(Face::Top, 8).is_some());
    }

    #[test]
    fn notation_json_is_a_flat_object() {
        let mut notation = Notation::new();
        notation.insert(FaceletKey::new(Face::Front, 0).unwrap(), 'B');

        let json = serde_json::to_string(&notation).unwrap();
        assert_eq!(json, r#"{"F1":"B"}"#);

        let parsed: Notation = serde_json::from_str(r#"{"F1":"B","X":"long"}"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(FaceletKey::new(Face::Front, 0).unwrap()), Some("B"));
    }
}
