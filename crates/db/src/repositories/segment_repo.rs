//! Repository for the `segments` table.

use sqlx::PgPool;

use quizmaker_core::types::{SegmentId, VideoId};

use crate::models::segment::{CreateSegment, Segment, UpdateSegment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "segment_id AS id, video_id, content, word_count, \
    creator_id, status, error_message, created_at, updated_at";

/// Provides CRUD operations for transcript segments.
pub struct SegmentRepo;

impl SegmentRepo {
    /// Insert a new segment, returning the created row.
    ///
    /// If `status` is `None`, defaults to `pending`.
    pub async fn create(pool: &PgPool, input: &CreateSegment) -> Result<Segment, sqlx::Error> {
        let query = format!(
            "INSERT INTO segments (video_id, content, word_count, creator_id, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'pending'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Segment>(&query)
            .bind(input.video_id)
            .bind(&input.content)
            .bind(input.word_count)
            .bind(input.creator_id)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a segment by its id.
    pub async fn find_by_id(pool: &PgPool, id: SegmentId) -> Result<Option<Segment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM segments WHERE segment_id = $1");
        sqlx::query_as::<_, Segment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update, returning the fresh row.
    pub async fn update(
        pool: &PgPool,
        id: SegmentId,
        input: &UpdateSegment,
    ) -> Result<Segment, sqlx::Error> {
        let query = format!(
            "UPDATE segments SET
                 content = COALESCE($2, content),
                 word_count = COALESCE($3, word_count),
                 status = COALESCE($4, status),
                 error_message = COALESCE($5, error_message),
                 updated_at = NOW()
             WHERE segment_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Segment>(&query)
            .bind(id)
            .bind(&input.content)
            .bind(input.word_count)
            .bind(&input.status)
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// List a video's segments in creation order.
    pub async fn list_by_video(pool: &PgPool, video_id: VideoId) -> Result<Vec<Segment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM segments
             WHERE video_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Segment>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }
}
