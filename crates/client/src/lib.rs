//! HTTP boundaries of the quizmaker client.
//!
//! Two external collaborators live here: the job API that runs the
//! transcription/question pipeline, and the auth provider that issues
//! sessions. Both are plain REST surfaces spoken through [`reqwest`].

pub mod api;
pub mod auth;
pub mod session;

pub use api::{QuizApi, QuizApiError, RegenerateRequest};
pub use auth::{AuthClient, AuthConfig, AuthError, AuthUser, Session};
pub use session::SessionContext;
