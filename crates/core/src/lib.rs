//! Domain types shared across the quizmaker workspace.
//!
//! Pure types and validation only, no I/O. Data access lives in
//! `quizmaker-db`, HTTP clients in `quizmaker-client`.

pub mod answer;
pub mod error;
pub mod status;
pub mod types;
pub mod youtube;
