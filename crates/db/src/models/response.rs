//! Response entity model (read-only from this client).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizmaker_core::types::{QuestionId, ResponseId, Timestamp, UserId};

/// A row from the `responses` table: one user's answer to a question.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Response {
    #[serde(alias = "response_id")]
    pub id: ResponseId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub selected_answer: String,
    pub is_correct: bool,
    pub created_at: Timestamp,
}
