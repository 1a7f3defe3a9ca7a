//! Creation & polling workflow.
//!
//! Submission validates the URL and asks the job API to start the
//! pipeline; the returned row is a `pending` job. From there a
//! [`StatusPoller`] fetches the row at a fixed cadence until it
//! observes a terminal status. There is no backoff, no jitter, and no
//! maximum poll count; the cadence is fixed until terminal state or
//! cancellation.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use quizmaker_client::{QuizApi, SessionContext};
use quizmaker_core::error::CoreError;
use quizmaker_core::status::{progress_label, VideoStatus};
use quizmaker_core::types::VideoId;
use quizmaker_core::youtube;
use quizmaker_db::models::Video;
use quizmaker_db::repositories::VideoRepo;
use quizmaker_db::DbPool;

use crate::error::{WorkflowError, WorkflowResult};

/// Fixed poll cadence: one status check every two seconds.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Shown when a job fails without a backend-provided message.
pub const DEFAULT_PROCESSING_ERROR: &str = "Failed to process video";

/// A validated submission, ready to send to the job API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The URL exactly as the user entered it.
    pub url: String,
    /// The 11-character id extracted from the URL.
    pub youtube_id: String,
    /// Temporary job title; the backend replaces it with the real one.
    pub title: String,
}

impl Submission {
    /// Validate a raw URL. Fails with `InvalidInput` before any
    /// network call when no video id can be extracted.
    pub fn parse(raw_url: &str) -> Result<Self, CoreError> {
        let youtube_id = youtube::extract_video_id(raw_url)
            .ok_or_else(|| CoreError::InvalidInput("Invalid YouTube URL".to_string()))?
            .to_string();
        let title = youtube::placeholder_title(&youtube_id);
        Ok(Self {
            url: raw_url.to_string(),
            youtube_id,
            title,
        })
    }
}

/// Seam over the job API's transcribe endpoint.
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn start_transcription(&self, url: &str, token: &str) -> WorkflowResult<Video>;
}

#[async_trait]
impl JobApi for QuizApi {
    async fn start_transcription(&self, url: &str, token: &str) -> WorkflowResult<Video> {
        Ok(self.transcribe(url, token).await?)
    }
}

/// Submit a video URL for processing.
///
/// Validation order matters: a bad URL or a missing token fails here,
/// before anything goes over the wire.
pub async fn submit<A>(
    api: &A,
    session: &SessionContext,
    raw_url: &str,
) -> WorkflowResult<Video>
where
    A: JobApi + ?Sized,
{
    let submission = Submission::parse(raw_url)?;
    let token = session.bearer_token()?;

    tracing::info!(youtube_id = %submission.youtube_id, "Submitting video for processing");
    let video = api.start_transcription(&submission.url, token).await?;
    tracing::info!(video_id = %video.id, status = %video.status, "Job created");
    Ok(video)
}

/// Seam over "fetch the current job row". The poller only needs this
/// one read.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch(&self, id: VideoId) -> WorkflowResult<Video>;
}

/// Store-backed [`VideoSource`].
pub struct PgVideoSource {
    pool: DbPool,
}

impl PgVideoSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoSource for PgVideoSource {
    async fn fetch(&self, id: VideoId) -> WorkflowResult<Video> {
        VideoRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "video", id }.into())
    }
}

/// How a polling run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The job reached `completed`; the caller moves on to review.
    Completed(Video),
    /// The job reached `error`; `message` is the backend's
    /// `error_message` or [`DEFAULT_PROCESSING_ERROR`].
    Failed { message: String },
    /// The poller was cancelled before a terminal status.
    Cancelled,
}

/// Fixed-cadence status poller for one job.
///
/// Owns a [`CancellationToken`]; whoever holds a clone of it can tear
/// the poller down (view navigated away, process shutting down). The
/// poller always stops on its own at the first terminal observation.
pub struct StatusPoller<S> {
    source: S,
    interval: Duration,
    cancel: CancellationToken,
}

impl<S: VideoSource> StatusPoller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            interval: POLL_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }

    /// Override the cadence (tests, configuration).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// A handle that cancels this poller when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Poll until terminal status, fetch failure, or cancellation.
    ///
    /// `on_progress` receives a human-readable label on every
    /// non-terminal observation. A fetch failure is terminal: the
    /// error propagates and no retry happens.
    pub async fn run<F>(&self, video_id: VideoId, mut on_progress: F) -> WorkflowResult<PollOutcome>
    where
        F: FnMut(&str) + Send,
    {
        let mut ticker = tokio::time::interval(self.interval);
        // A fetch slower than the cadence delays the next tick rather
        // than firing a burst of catch-up polls.
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first interval tick completes immediately; consume it so
        // the first status check lands one full period after start.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    tracing::debug!(%video_id, "Status polling cancelled");
                    return Ok(PollOutcome::Cancelled);
                }
                _ = ticker.tick() => {
                    let video = self.source.fetch(video_id).await?;

                    match VideoStatus::parse(&video.status) {
                        Some(VideoStatus::Error) => {
                            let message = video
                                .error_message
                                .clone()
                                .filter(|m| !m.is_empty())
                                .unwrap_or_else(|| DEFAULT_PROCESSING_ERROR.to_string());
                            tracing::warn!(%video_id, %message, "Job failed");
                            return Ok(PollOutcome::Failed { message });
                        }
                        Some(VideoStatus::Completed) => {
                            tracing::info!(%video_id, "Job completed");
                            return Ok(PollOutcome::Completed(video));
                        }
                        // Unknown statuses read as "still processing".
                        _ => on_progress(progress_label(&video.status)),
                    }
                }
            }
        }
    }
}
