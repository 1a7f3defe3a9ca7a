//! Integration tests for the repository layer against a real database:
//! - video/segment/question round trips
//! - partial question updates
//! - nested load ordering (video -> segments -> questions)
//! - dashboard listing order

mod common;

use sqlx::PgPool;
use uuid::Uuid;

use common::{new_question, new_segment, new_video};
use quizmaker_db::models::{UpdateQuestion, UpdateSegment, UpdateVideo};
use quizmaker_db::repositories::{QuestionRepo, ResponseRepo, SegmentRepo, VideoRepo};

#[sqlx::test(migrations = "./migrations")]
async fn video_create_and_find(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "Video dQw4w9WgXcQ"))
        .await
        .unwrap();

    assert_eq!(video.title, "Video dQw4w9WgXcQ");
    assert_eq!(video.status, "pending");
    assert_eq!(video.creator_id, creator);

    let found = VideoRepo::find_by_id(&pool, video.id).await.unwrap().unwrap();
    assert_eq!(found, video);

    let missing = VideoRepo::find_by_id(&pool, Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_creator_is_newest_first(pool: PgPool) {
    let creator = Uuid::new_v4();
    let other = Uuid::new_v4();

    let first = VideoRepo::create(&pool, &new_video(creator, "first")).await.unwrap();
    let second = VideoRepo::create(&pool, &new_video(creator, "second")).await.unwrap();
    VideoRepo::create(&pool, &new_video(other, "theirs")).await.unwrap();

    let listed = VideoRepo::list_by_creator(&pool, creator).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn video_partial_update_keeps_other_fields(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "Video dQw4w9WgXcQ"))
        .await
        .unwrap();

    let update = UpdateVideo {
        status: Some("error".to_string()),
        error_message: Some("Download failed".to_string()),
        ..UpdateVideo::default()
    };
    let updated = VideoRepo::update(&pool, video.id, &update).await.unwrap();

    assert_eq!(updated.status, "error");
    assert_eq!(updated.error_message.as_deref(), Some("Download failed"));
    assert_eq!(updated.title, video.title);
    assert_eq!(updated.url, video.url);
}

#[sqlx::test(migrations = "./migrations")]
async fn segment_partial_update_keeps_other_fields(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "v")).await.unwrap();
    let segment = SegmentRepo::create(&pool, &new_segment(video.id, creator, "original content"))
        .await
        .unwrap();

    let update = UpdateSegment {
        content: Some("corrected content".to_string()),
        word_count: Some(2),
        ..UpdateSegment::default()
    };
    let updated = SegmentRepo::update(&pool, segment.id, &update).await.unwrap();

    assert_eq!(updated.content, "corrected content");
    assert_eq!(updated.word_count, 2);
    assert_eq!(updated.status, segment.status);
    assert_eq!(updated.video_id, segment.video_id);
}

#[sqlx::test(migrations = "./migrations")]
async fn question_partial_update_keeps_other_fields(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "v")).await.unwrap();
    let segment = SegmentRepo::create(&pool, &new_segment(video.id, creator, "some transcript text"))
        .await
        .unwrap();
    let question = QuestionRepo::create(&pool, &new_question(segment.id, creator, 1))
        .await
        .unwrap();

    let update = UpdateQuestion {
        question_text: Some("Rewritten?".to_string()),
        correct_answer: Some("C".to_string()),
        ..UpdateQuestion::default()
    };
    let updated = QuestionRepo::update(&pool, question.id, &update).await.unwrap();

    assert_eq!(updated.question_text, "Rewritten?");
    assert_eq!(updated.correct_answer, "C");
    // Untouched fields survive the partial update.
    assert_eq!(updated.option_a, question.option_a);
    assert_eq!(updated.option_d, question.option_d);
    assert_eq!(updated.question_number, question.question_number);
}

#[sqlx::test(migrations = "./migrations")]
async fn invalid_answer_letter_is_blocked_by_the_store(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "v")).await.unwrap();
    let segment = SegmentRepo::create(&pool, &new_segment(video.id, creator, "text"))
        .await
        .unwrap();
    let question = QuestionRepo::create(&pool, &new_question(segment.id, creator, 1))
        .await
        .unwrap();

    let update = UpdateQuestion {
        correct_answer: Some("E".to_string()),
        ..UpdateQuestion::default()
    };
    let err = QuestionRepo::update(&pool, question.id, &update).await;
    assert!(err.is_err(), "CHECK constraint should reject letter E");
}

#[sqlx::test(migrations = "./migrations")]
async fn responses_list_oldest_first(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "v")).await.unwrap();
    let segment = SegmentRepo::create(&pool, &new_segment(video.id, creator, "text"))
        .await
        .unwrap();
    let question = QuestionRepo::create(&pool, &new_question(segment.id, creator, 1))
        .await
        .unwrap();

    // Responses are written by the quiz-taking surface, not this client;
    // seed them directly.
    for (answer, correct) in [("A", true), ("B", false)] {
        sqlx::query(
            "INSERT INTO responses (question_id, user_id, selected_answer, is_correct)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(question.id)
        .bind(Uuid::new_v4())
        .bind(answer)
        .bind(correct)
        .execute(&pool)
        .await
        .unwrap();
    }

    let listed = ResponseRepo::list_by_question(&pool, question.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].selected_answer, "A");
    assert!(listed[0].is_correct);
    assert_eq!(listed[1].selected_answer, "B");
    assert!(!listed[1].is_correct);
}

#[sqlx::test(migrations = "./migrations")]
async fn nested_load_orders_by_creation_time(pool: PgPool) {
    let creator = Uuid::new_v4();
    let video = VideoRepo::create(&pool, &new_video(creator, "v")).await.unwrap();

    let seg_a = SegmentRepo::create(&pool, &new_segment(video.id, creator, "first segment"))
        .await
        .unwrap();
    let seg_b = SegmentRepo::create(&pool, &new_segment(video.id, creator, "second segment"))
        .await
        .unwrap();

    let q1 = QuestionRepo::create(&pool, &new_question(seg_a.id, creator, 1)).await.unwrap();
    let q2 = QuestionRepo::create(&pool, &new_question(seg_a.id, creator, 2)).await.unwrap();
    let q3 = QuestionRepo::create(&pool, &new_question(seg_b.id, creator, 1)).await.unwrap();

    let tree = VideoRepo::find_with_questions(&pool, video.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(tree.video.id, video.id);
    assert_eq!(tree.segments.len(), 2);
    assert_eq!(tree.segments[0].segment.id, seg_a.id);
    assert_eq!(tree.segments[1].segment.id, seg_b.id);

    let first_ids: Vec<_> = tree.segments[0].questions.iter().map(|q| q.id).collect();
    assert_eq!(first_ids, vec![q1.id, q2.id]);
    assert_eq!(tree.segments[1].questions[0].id, q3.id);

    let missing = VideoRepo::find_with_questions(&pool, Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}
