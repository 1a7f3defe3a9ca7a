//! Row types and DTOs for the four quizmaker tables.

pub mod question;
pub mod response;
pub mod segment;
pub mod video;

pub use question::{CreateQuestion, Question, UpdateQuestion};
pub use response::Response;
pub use segment::{CreateSegment, Segment, SegmentWithQuestions, UpdateSegment};
pub use video::{CreateVideo, UpdateVideo, Video, VideoWithQuestions};
