//! The closed set of answer letters for a multiple-choice question.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the four option letters. Anything else is rejected at the
/// edge. The store column carries a matching CHECK constraint, but the
/// client validates before sending an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    /// Parse an answer letter, rejecting anything outside `A`..`D`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(CoreError::InvalidInput(format!(
                "Correct answer must be A, B, C, or D (got {other:?})"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// All options in display order.
    pub const ALL: [AnswerOption; 4] = [Self::A, Self::B, Self::C, Self::D];
}

impl std::fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
