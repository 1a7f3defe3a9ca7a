//! The three user-facing workflows of the quizmaker client.
//!
//! - [`create`]: submit a video URL, then poll the job at a fixed
//!   cadence until it completes or fails.
//! - [`review`]: load a video with its segments and questions, edit
//!   questions in place, regenerate single questions.
//! - [`dashboard`]: list a user's jobs and delete one (cascading).
//!
//! Workflows talk to the store through `quizmaker-db` and to the job
//! API through seam traits, so the state machines are testable with
//! scripted fakes.

pub mod create;
pub mod dashboard;
pub mod error;
pub mod review;

pub use create::{JobApi, PollOutcome, StatusPoller, Submission, VideoSource, POLL_INTERVAL};
pub use error::WorkflowError;
pub use review::{QuestionEdit, QuestionGenerator};
