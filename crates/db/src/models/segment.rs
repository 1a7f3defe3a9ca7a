//! Segment entity model.
//!
//! Segments are chunks of a video's transcript, created by the backend
//! during segmentation. The client reads them for review, can patch
//! one (content corrections), and removes them via the cascading
//! delete.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizmaker_core::types::{SegmentId, Timestamp, UserId, VideoId};

use super::question::Question;

/// A row from the `segments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Segment {
    #[serde(alias = "segment_id")]
    pub id: SegmentId,
    pub video_id: VideoId,
    pub content: String,
    pub word_count: i32,
    pub creator_id: UserId,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new segment row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSegment {
    pub video_id: VideoId,
    pub content: String,
    pub word_count: i32,
    pub creator_id: UserId,
    /// Defaults to `pending` if omitted.
    pub status: Option<String>,
}

/// DTO for a partial segment update. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSegment {
    pub content: Option<String>,
    pub word_count: Option<i32>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

/// A segment together with its questions in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentWithQuestions {
    #[serde(flatten)]
    pub segment: Segment,
    pub questions: Vec<Question>,
}
