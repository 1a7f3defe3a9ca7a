use quizmaker_client::{AuthError, QuizApiError};
use quizmaker_core::error::CoreError;

/// Workflow-level error type.
///
/// Wraps [`CoreError`] for domain errors and adds the failures of the
/// two remote collaborators (store, job/auth APIs). Every variant is
/// terminal for the operation that raised it; nothing retries.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A domain-level error from `quizmaker-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A job API error.
    #[error(transparent)]
    Api(#[from] QuizApiError),

    /// An auth provider error.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Convenience alias for workflow return values.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
