//! Question entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizmaker_core::answer::AnswerOption;
use quizmaker_core::types::{QuestionId, SegmentId, Timestamp, UserId};

/// A row from the `questions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "question_id")]
    pub id: QuestionId,
    pub segment_id: SegmentId,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// `A`..`D`; guarded by a CHECK constraint in the store and by
    /// [`AnswerOption::parse`] before any client-side update.
    pub correct_answer: String,
    pub question_number: i32,
    pub creator_id: UserId,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Question {
    /// Text of the option behind a letter. Exhaustive mapping, no
    /// string-built field lookup.
    pub fn option_text(&self, choice: AnswerOption) -> &str {
        match choice {
            AnswerOption::A => &self.option_a,
            AnswerOption::B => &self.option_b,
            AnswerOption::C => &self.option_c,
            AnswerOption::D => &self.option_d,
        }
    }
}

/// DTO for inserting a new question row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub segment_id: SegmentId,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub question_number: i32,
    pub creator_id: UserId,
}

/// DTO for a partial question update. All fields optional; `None`
/// leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQuestion {
    pub question_text: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_answer: Option<String>,
}
