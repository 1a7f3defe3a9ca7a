//! Video (job) entity model and DTOs.
//!
//! One row per user-submitted video-to-quiz job. The backend pipeline
//! owns the `status` column and fills in `transcript`, `word_count`,
//! and `duration_seconds` as processing advances.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizmaker_core::types::{Timestamp, UserId, VideoId};

use super::segment::SegmentWithQuestions;

/// A row from the `videos` table.
///
/// The store column is `video_id`; queries alias it to `id`. The serde
/// alias accepts the job API's `video_id` key when rows travel over
/// HTTP.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Video {
    #[serde(alias = "video_id")]
    pub id: VideoId,
    pub title: String,
    pub url: String,
    pub transcript: Option<String>,
    pub word_count: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub max_segments: Option<i32>,
    pub creator_id: UserId,
    /// Status string as written by the backend; parse with
    /// [`quizmaker_core::status::VideoStatus::parse`].
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new video row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub url: String,
    pub creator_id: UserId,
    /// Defaults to `pending` if omitted.
    pub status: Option<String>,
}

/// DTO for a partial video update. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub transcript: Option<String>,
    pub word_count: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub max_segments: Option<i32>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

/// A video joined with its segments and each segment's questions, in
/// creation order. This is the shape the review workflow renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoWithQuestions {
    #[serde(flatten)]
    pub video: Video,
    pub segments: Vec<SegmentWithQuestions>,
}
