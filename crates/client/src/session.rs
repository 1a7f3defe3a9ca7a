//! Explicit session context.
//!
//! There is no ambient "current user" anywhere in this workspace. A
//! [`SessionContext`] is built once from a provider [`Session`] and
//! threaded by value through every workflow that needs the user id or
//! the bearer token.

use serde::{Deserialize, Serialize};

use quizmaker_core::error::CoreError;
use quizmaker_core::types::UserId;

use crate::auth::Session;

/// The signed-in user's identity and bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: UserId,
    pub email: Option<String>,
    pub access_token: String,
}

impl SessionContext {
    /// The bearer token, or `Unauthenticated` when the session carries
    /// none (e.g. sign-up pending email confirmation). Checked before
    /// any network call that needs authentication.
    pub fn bearer_token(&self) -> Result<&str, CoreError> {
        if self.access_token.is_empty() {
            return Err(CoreError::Unauthenticated(
                "No authentication token available".to_string(),
            ));
        }
        Ok(&self.access_token)
    }
}

impl From<Session> for SessionContext {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user.id,
            email: session.user.email,
            access_token: session.access_token,
        }
    }
}
