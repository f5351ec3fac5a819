use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CodecError, CubeState, InvalidMove, Notation, Solution, encode};

/// Body of a solve request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverRequest {
    pub rubiks_cube: Notation,
}

impl SolverRequest {
    pub fn new(state: &CubeState) -> Result<SolverRequest, CodecError> {
        Ok(SolverRequest {
            rubiks_cube: encode(state)?,
        })
    }
}

/// Body of a solve reply.
///
/// A rejected request carries `non_field_errors`, a `detail` string, or a per-field error list
/// such as `{"rubiks_cube": ["This field is required."]}`; the latter end up in `field_errors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub sequence: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_field_errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub field_errors: BTreeMap<String, Value>,
}

/// What a reply means for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AlreadySolved,
    Solved(Solution),
    Rejected(Vec<String>),
}

impl SolverResponse {
    /// Every error message in the reply, field errors prefixed with their field path.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        let mut out = self.non_field_errors.clone().unwrap_or_default();
        out.extend(self.detail.iter().cloned());

        for (field, value) in &self.field_errors {
            if matches!(value, Value::Array(_) | Value::Object(_)) {
                collect_messages(field, value, &mut out);
            }
        }

        out
    }

    /// The presence of an error field, even an empty one, marks the request as rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.non_field_errors.is_some()
            || self.detail.is_some()
            || self
                .field_errors
                .values()
                .any(|v| matches!(v, Value::Array(_) | Value::Object(_)))
    }

    pub fn interpret(&self) -> Result<Outcome, InvalidMove> {
        if self.is_rejected() {
            return Ok(Outcome::Rejected(self.errors()));
        }

        if self.sequence.is_empty() {
            return Ok(Outcome::AlreadySolved);
        }

        Solution::try_from(self.sequence.clone()).map(Outcome::Solved)
    }
}

fn collect_messages(path: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(message) => out.push(format!("{path}: {message}")),
        Value::Array(items) => {
            for item in items {
                collect_messages(path, item, out);
            }
        }
        Value::Object(fields) => {
            for (field, value) in fields {
                collect_messages(&format!("{path}.{field}"), value, out);
            }
        }
        _ => {}
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::AlreadySolved => write!(f, "Cube is already solved!"),
            Outcome::Solved(solution) => {
                write!(f, "Solved in {} moves: {solution}", solution.len())
            }
            Outcome::Rejected(errors) if errors.is_empty() => {
                write!(f, "The solver rejected the cube")
            }
            Outcome::Rejected(errors) => write!(f, "{}", errors.iter().join(", ")),
        }
    }
}
