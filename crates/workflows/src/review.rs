//! Quiz review & edit workflow.
//!
//! Loads one video with its full segment/question tree, then supports
//! two mutations with deliberately different consistency strategies:
//!
//! - **Edit-save** updates the row and reloads the whole tree: the
//!   store may recompute fields, so no partial patch is trusted.
//! - **Regenerate** patches only the returned question into the loaded
//!   tree, since the endpoint returns a fully-formed replacement row.
//!
//! Nothing serialises concurrent regenerations of the same question;
//! both responses race and the last one applied wins locally.

use async_trait::async_trait;
use serde::Deserialize;
use validator::Validate;

use quizmaker_client::{QuizApi, RegenerateRequest, SessionContext};
use quizmaker_core::answer::AnswerOption;
use quizmaker_core::error::CoreError;
use quizmaker_core::types::{QuestionId, VideoId};
use quizmaker_db::models::{Question, UpdateQuestion, VideoWithQuestions};
use quizmaker_db::repositories::{QuestionRepo, VideoRepo};
use quizmaker_db::DbPool;

use crate::error::{WorkflowError, WorkflowResult};

/// Load a video with segments and questions in creation order.
pub async fn load(pool: &DbPool, video_id: VideoId) -> WorkflowResult<VideoWithQuestions> {
    VideoRepo::find_with_questions(pool, video_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "video",
                id: video_id,
            }
            .into()
        })
}

/// The inline edit form, seeded from the question being edited.
///
/// At most one question is in edit state at a time; the form carries
/// that question's current field values until saved or discarded.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct QuestionEdit {
    #[validate(length(min = 1, message = "Question text must not be empty"))]
    pub question_text: String,
    #[validate(length(min = 1, message = "Option A must not be empty"))]
    pub option_a: String,
    #[validate(length(min = 1, message = "Option B must not be empty"))]
    pub option_b: String,
    #[validate(length(min = 1, message = "Option C must not be empty"))]
    pub option_c: String,
    #[validate(length(min = 1, message = "Option D must not be empty"))]
    pub option_d: String,
    /// Must be one of `A`..`D`.
    pub correct_answer: String,
}

impl QuestionEdit {
    /// Seed the form with a question's current values.
    pub fn seeded_from(question: &Question) -> Self {
        Self {
            question_text: question.question_text.clone(),
            option_a: question.option_a.clone(),
            option_b: question.option_b.clone(),
            option_c: question.option_c.clone(),
            option_d: question.option_d.clone(),
            correct_answer: question.correct_answer.clone(),
        }
    }

    /// Validate the form, producing the partial update to send.
    ///
    /// Rejects with `InvalidInput` before any update request is made:
    /// empty fields, or a correct answer outside `A`..`D`.
    pub fn into_update(self) -> Result<UpdateQuestion, CoreError> {
        self.validate()
            .map_err(|e| CoreError::InvalidInput(e.to_string()))?;
        let answer = AnswerOption::parse(&self.correct_answer)?;

        Ok(UpdateQuestion {
            question_text: Some(self.question_text),
            option_a: Some(self.option_a),
            option_b: Some(self.option_b),
            option_c: Some(self.option_c),
            option_d: Some(self.option_d),
            correct_answer: Some(answer.as_str().to_string()),
        })
    }
}

/// Save an edited question, then reload the whole video subtree.
///
/// The full reload (rather than patching the one row locally)
/// guarantees the view matches any server-side recomputation.
pub async fn save_question(
    pool: &DbPool,
    video_id: VideoId,
    question_id: QuestionId,
    edit: QuestionEdit,
) -> WorkflowResult<VideoWithQuestions> {
    let update = edit.into_update()?;
    QuestionRepo::update(pool, question_id, &update).await?;
    tracing::info!(%question_id, "Question saved");
    load(pool, video_id).await
}

/// Seam over the job API's regenerate endpoint.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn regenerate(
        &self,
        request: &RegenerateRequest,
        token: &str,
    ) -> WorkflowResult<Question>;
}

#[async_trait]
impl QuestionGenerator for QuizApi {
    async fn regenerate(
        &self,
        request: &RegenerateRequest,
        token: &str,
    ) -> WorkflowResult<Question> {
        Ok(QuizApi::regenerate(self, request, token).await?)
    }
}

/// Regenerate one question and patch the replacement into the loaded
/// tree by id. Only the matching question changes.
pub async fn regenerate_question<G>(
    generator: &G,
    session: &SessionContext,
    video: &mut VideoWithQuestions,
    question_id: QuestionId,
) -> WorkflowResult<()>
where
    G: QuestionGenerator + ?Sized,
{
    let request = build_regenerate_request(video, question_id).ok_or(CoreError::NotFound {
        entity: "question",
        id: question_id,
    })?;
    let token = session.bearer_token()?;

    let replacement = generator.regenerate(&request, token).await?;
    tracing::info!(%question_id, "Question regenerated");
    apply_regenerated(video, replacement);
    Ok(())
}

/// Build the regeneration request from the already-loaded tree: the
/// owning segment's content plus the question's position within it.
fn build_regenerate_request(
    video: &VideoWithQuestions,
    question_id: QuestionId,
) -> Option<RegenerateRequest> {
    for segment in &video.segments {
        for question in &segment.questions {
            if question.id == question_id {
                return Some(RegenerateRequest {
                    question_id,
                    segment_content: segment.segment.content.clone(),
                    question_number: question.question_number,
                });
            }
        }
    }
    None
}

/// Replace the question with the matching id, leaving every other
/// question untouched. A replacement for an id no longer in the tree
/// is dropped silently (the row was deleted underneath us).
fn apply_regenerated(video: &mut VideoWithQuestions, replacement: Question) {
    for segment in &mut video.segments {
        for question in &mut segment.questions {
            if question.id == replacement.id {
                *question = replacement;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    use quizmaker_db::models::{Segment, SegmentWithQuestions, Video};

    fn make_question(segment_id: Uuid, number: i32) -> Question {
        Question {
            id: Uuid::new_v4(),
            segment_id,
            question_text: format!("Question {number}?"),
            option_a: "Alpha".into(),
            option_b: "Bravo".into(),
            option_c: "Charlie".into(),
            option_d: "Delta".into(),
            correct_answer: "A".into(),
            question_number: number,
            creator_id: Uuid::new_v4(),
            status: "completed".into(),
            error_message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_tree() -> VideoWithQuestions {
        let video_id = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let segments = (0..2)
            .map(|i| {
                let segment = Segment {
                    id: Uuid::new_v4(),
                    video_id,
                    content: format!("segment {i} content"),
                    word_count: 3,
                    creator_id: creator,
                    status: "completed".into(),
                    error_message: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                };
                let questions = vec![make_question(segment.id, 1), make_question(segment.id, 2)];
                SegmentWithQuestions { segment, questions }
            })
            .collect();

        VideoWithQuestions {
            video: Video {
                id: video_id,
                title: "Video dQw4w9WgXcQ".into(),
                url: "https://youtu.be/dQw4w9WgXcQ".into(),
                transcript: Some("transcript".into()),
                word_count: Some(6),
                duration_seconds: Some(120),
                max_segments: None,
                creator_id: creator,
                status: "completed".into(),
                error_message: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            segments,
        }
    }

    struct RecordingGenerator {
        calls: AtomicUsize,
        last_request: Mutex<Option<RegenerateRequest>>,
        replacement: Question,
    }

    impl RecordingGenerator {
        fn returning(replacement: Question) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                replacement,
            }
        }
    }

    #[async_trait]
    impl QuestionGenerator for RecordingGenerator {
        async fn regenerate(
            &self,
            request: &RegenerateRequest,
            _token: &str,
        ) -> WorkflowResult<Question> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(self.replacement.clone())
        }
    }

    fn session() -> SessionContext {
        SessionContext {
            user_id: Uuid::new_v4(),
            email: None,
            access_token: "jwt".into(),
        }
    }

    #[test]
    fn edit_with_bad_answer_letter_is_rejected() {
        let edit = QuestionEdit {
            question_text: "Q?".into(),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
            correct_answer: "E".into(),
        };
        assert_matches!(edit.into_update(), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn edit_with_empty_field_is_rejected() {
        let edit = QuestionEdit {
            question_text: String::new(),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
            correct_answer: "A".into(),
        };
        assert_matches!(edit.into_update(), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn valid_edit_becomes_a_full_field_update() {
        let tree = make_tree();
        let question = &tree.segments[0].questions[0];

        let mut edit = QuestionEdit::seeded_from(question);
        edit.correct_answer = "D".into();
        let update = edit.into_update().unwrap();

        assert_eq!(update.question_text.as_deref(), Some("Question 1?"));
        assert_eq!(update.correct_answer.as_deref(), Some("D"));
    }

    #[tokio::test]
    async fn regenerate_sends_segment_content_and_question_number() {
        let mut tree = make_tree();
        let target = tree.segments[1].questions[1].clone();

        let mut replacement = target.clone();
        replacement.question_text = "Regenerated?".into();
        let generator = RecordingGenerator::returning(replacement);

        regenerate_question(&generator, &session(), &mut tree, target.id)
            .await
            .unwrap();

        let request = generator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.question_id, target.id);
        assert_eq!(request.segment_content, "segment 1 content");
        assert_eq!(request.question_number, 2);
    }

    #[tokio::test]
    async fn regenerate_patches_only_the_matching_question() {
        let mut tree = make_tree();
        let before = tree.clone();
        let target = tree.segments[0].questions[1].clone();

        let mut replacement = target.clone();
        replacement.question_text = "Regenerated?".into();
        replacement.correct_answer = "C".into();
        let generator = RecordingGenerator::returning(replacement.clone());

        regenerate_question(&generator, &session(), &mut tree, target.id)
            .await
            .unwrap();

        assert_eq!(tree.segments[0].questions[1], replacement);
        // Everything else is untouched, field for field.
        assert_eq!(tree.video, before.video);
        assert_eq!(tree.segments[0].questions[0], before.segments[0].questions[0]);
        assert_eq!(tree.segments[1], before.segments[1]);
    }

    #[tokio::test]
    async fn regenerate_of_unknown_question_makes_no_call() {
        let mut tree = make_tree();
        let generator = RecordingGenerator::returning(make_question(Uuid::new_v4(), 1));

        let err =
            regenerate_question(&generator, &session(), &mut tree, Uuid::new_v4()).await;
        assert_matches!(
            err,
            Err(WorkflowError::Core(CoreError::NotFound { entity: "question", .. }))
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn regenerate_without_token_makes_no_call() {
        let mut tree = make_tree();
        let target_id = tree.segments[0].questions[0].id;
        let generator = RecordingGenerator::returning(make_question(Uuid::new_v4(), 1));

        let mut anonymous = session();
        anonymous.access_token = String::new();

        let err = regenerate_question(&generator, &anonymous, &mut tree, target_id).await;
        assert_matches!(
            err,
            Err(WorkflowError::Core(CoreError::Unauthenticated(_)))
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}
