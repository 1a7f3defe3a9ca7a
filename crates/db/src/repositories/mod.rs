//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod question_repo;
pub mod response_repo;
pub mod segment_repo;
pub mod video_repo;

pub use question_repo::QuestionRepo;
pub use response_repo::ResponseRepo;
pub use segment_repo::SegmentRepo;
pub use video_repo::VideoRepo;
