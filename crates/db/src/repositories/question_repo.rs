//! Repository for the `questions` table.

use sqlx::PgPool;

use quizmaker_core::types::{QuestionId, SegmentId};

use crate::models::question::{CreateQuestion, Question, UpdateQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "question_id AS id, segment_id, question_text, \
    option_a, option_b, option_c, option_d, correct_answer, \
    question_number, creator_id, status, error_message, \
    created_at, updated_at";

/// Provides CRUD operations for multiple-choice questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions
                 (segment_id, question_text, option_a, option_b, option_c,
                  option_d, correct_answer, question_number, creator_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.segment_id)
            .bind(&input.question_text)
            .bind(&input.option_a)
            .bind(&input.option_b)
            .bind(&input.option_c)
            .bind(&input.option_d)
            .bind(&input.correct_answer)
            .bind(input.question_number)
            .bind(input.creator_id)
            .fetch_one(pool)
            .await
    }

    /// Find a question by its id.
    pub async fn find_by_id(pool: &PgPool, id: QuestionId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE question_id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a segment's questions in creation order.
    pub async fn list_by_segment(
        pool: &PgPool,
        segment_id: SegmentId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE segment_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(segment_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update keyed by question id, returning the
    /// fresh row. `None` fields keep their stored value.
    pub async fn update(
        pool: &PgPool,
        id: QuestionId,
        input: &UpdateQuestion,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET
                 question_text = COALESCE($2, question_text),
                 option_a = COALESCE($3, option_a),
                 option_b = COALESCE($4, option_b),
                 option_c = COALESCE($5, option_c),
                 option_d = COALESCE($6, option_d),
                 correct_answer = COALESCE($7, correct_answer),
                 updated_at = NOW()
             WHERE question_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.question_text)
            .bind(&input.option_a)
            .bind(&input.option_b)
            .bind(&input.option_c)
            .bind(&input.option_d)
            .bind(&input.correct_answer)
            .fetch_one(pool)
            .await
    }
}
