use uuid::Uuid;

/// Domain-level error taxonomy.
///
/// Every operation that fails, fails terminally: there is no retry,
/// no backoff, and no rollback of partially-applied work anywhere in
/// the client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input rejected before any network or database call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The action requires a signed-in session with an access token.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },
}
