//! Shared fixtures for repository integration tests.

use uuid::Uuid;

use quizmaker_db::models::{CreateQuestion, CreateSegment, CreateVideo};

pub fn new_video(creator_id: Uuid, title: &str) -> CreateVideo {
    CreateVideo {
        title: title.to_string(),
        url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        creator_id,
        status: None,
    }
}

pub fn new_segment(video_id: Uuid, creator_id: Uuid, content: &str) -> CreateSegment {
    CreateSegment {
        video_id,
        content: content.to_string(),
        word_count: content.split_whitespace().count() as i32,
        creator_id,
        status: Some("completed".to_string()),
    }
}

pub fn new_question(segment_id: Uuid, creator_id: Uuid, number: i32) -> CreateQuestion {
    CreateQuestion {
        segment_id,
        question_text: format!("Question {number}?"),
        option_a: "Alpha".to_string(),
        option_b: "Bravo".to_string(),
        option_c: "Charlie".to_string(),
        option_d: "Delta".to_string(),
        correct_answer: "A".to_string(),
        question_number: number,
        creator_id,
    }
}
