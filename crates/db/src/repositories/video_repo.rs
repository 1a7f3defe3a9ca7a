//! Repository for the `videos` table.

use sqlx::PgPool;

use quizmaker_core::types::{UserId, VideoId};

use crate::models::segment::SegmentWithQuestions;
use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoWithQuestions};
use crate::models::Question;
use crate::repositories::question_repo::QuestionRepo;
use crate::repositories::segment_repo::SegmentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "video_id AS id, title, url, transcript, word_count, \
    duration_seconds, max_segments, creator_id, status, error_message, \
    created_at, updated_at";

/// Provides CRUD operations for video jobs.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video row, returning it.
    ///
    /// If `status` is `None`, defaults to `pending`.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (title, url, creator_id, status)
             VALUES ($1, $2, $3, COALESCE($4, 'pending'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.creator_id)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its id.
    pub async fn find_by_id(pool: &PgPool, id: VideoId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE video_id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's videos, newest first.
    pub async fn list_by_creator(pool: &PgPool, creator_id: UserId) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE creator_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the fresh row.
    pub async fn update(
        pool: &PgPool,
        id: VideoId,
        input: &UpdateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                 title = COALESCE($2, title),
                 transcript = COALESCE($3, transcript),
                 word_count = COALESCE($4, word_count),
                 duration_seconds = COALESCE($5, duration_seconds),
                 max_segments = COALESCE($6, max_segments),
                 status = COALESCE($7, status),
                 error_message = COALESCE($8, error_message),
                 updated_at = NOW()
             WHERE video_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.transcript)
            .bind(input.word_count)
            .bind(input.duration_seconds)
            .bind(input.max_segments)
            .bind(&input.status)
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// Load a video with its segments and each segment's questions,
    /// both in creation order.
    ///
    /// Returns `None` when no video matches.
    pub async fn find_with_questions(
        pool: &PgPool,
        id: VideoId,
    ) -> Result<Option<VideoWithQuestions>, sqlx::Error> {
        let video = match Self::find_by_id(pool, id).await? {
            Some(video) => video,
            None => return Ok(None),
        };

        let segments = SegmentRepo::list_by_video(pool, id).await?;

        let mut nested = Vec::with_capacity(segments.len());
        for segment in segments {
            let questions: Vec<Question> =
                QuestionRepo::list_by_segment(pool, segment.id).await?;
            nested.push(SegmentWithQuestions { segment, questions });
        }

        Ok(Some(VideoWithQuestions {
            video,
            segments: nested,
        }))
    }

    /// Delete a video and everything under it, in one transaction.
    ///
    /// Rows go in dependency order: every question, then every
    /// segment, then the video itself. The schema has no ON DELETE
    /// CASCADE, so any other order would trip a foreign key.
    ///
    /// Returns `true` if the video row existed.
    pub async fn delete_cascade(pool: &PgPool, id: VideoId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let segment_ids: Vec<(uuid::Uuid,)> =
            sqlx::query_as("SELECT segment_id FROM segments WHERE video_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        for (segment_id,) in &segment_ids {
            let question_ids: Vec<(uuid::Uuid,)> =
                sqlx::query_as("SELECT question_id FROM questions WHERE segment_id = $1")
                    .bind(segment_id)
                    .fetch_all(&mut *tx)
                    .await?;

            for (question_id,) in &question_ids {
                sqlx::query("DELETE FROM questions WHERE question_id = $1")
                    .bind(question_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        for (segment_id,) in &segment_ids {
            sqlx::query("DELETE FROM segments WHERE segment_id = $1")
                .bind(segment_id)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM videos WHERE video_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(video_id = %id, deleted, "Cascade delete finished");
        Ok(deleted)
    }
}
