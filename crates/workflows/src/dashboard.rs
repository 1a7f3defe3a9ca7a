//! Dashboard workflow: list a user's jobs, delete one.

use quizmaker_client::SessionContext;
use quizmaker_core::error::CoreError;
use quizmaker_core::types::VideoId;
use quizmaker_db::models::Video;
use quizmaker_db::repositories::VideoRepo;
use quizmaker_db::DbPool;

use crate::error::WorkflowResult;

/// List the session user's jobs, newest first.
pub async fn list(pool: &DbPool, session: &SessionContext) -> WorkflowResult<Vec<Video>> {
    Ok(VideoRepo::list_by_creator(pool, session.user_id).await?)
}

/// Delete a quiz and everything under it.
///
/// Callers are expected to have confirmed with the user first; this
/// function deletes unconditionally. The cascade (questions, then
/// segments, then the video) runs in one transaction at the store
/// boundary.
pub async fn remove(pool: &DbPool, video_id: VideoId) -> WorkflowResult<()> {
    let deleted = VideoRepo::delete_cascade(pool, video_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "video",
            id: video_id,
        }
        .into());
    }
    tracing::info!(%video_id, "Quiz deleted");
    Ok(())
}
