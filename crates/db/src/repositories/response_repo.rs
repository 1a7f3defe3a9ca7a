//! Repository for the `responses` table (read-only from this client).

use sqlx::PgPool;

use quizmaker_core::types::QuestionId;

use crate::models::response::Response;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "response_id AS id, question_id, user_id, selected_answer, is_correct, created_at";

/// Read access to recorded quiz answers.
pub struct ResponseRepo;

impl ResponseRepo {
    /// List every response to a question, oldest first.
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: QuestionId,
    ) -> Result<Vec<Response>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM responses
             WHERE question_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }
}
