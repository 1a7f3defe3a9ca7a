//! REST client for the quiz-generation job API.
//!
//! Two bearer-authenticated endpoints: one starts the
//! download/transcribe/segment/generate pipeline for a video URL, one
//! regenerates a single question from its segment's content.

use serde::{Deserialize, Serialize};

use quizmaker_core::types::QuestionId;
use quizmaker_db::models::{Question, Video};

/// HTTP client for the job API.
pub struct QuizApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the job API layer.
#[derive(Debug, thiserror::Error)]
pub enum QuizApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message, taken from the JSON `error` field
        /// when the body carries one.
        message: String,
    },
}

/// Body of `POST /api/transcript/transcribe`.
#[derive(Debug, Serialize)]
struct TranscribeRequest<'a> {
    url: &'a str,
}

/// Successful transcribe response: the created pending job row.
#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    video: Video,
}

/// Body of `POST /api/questions/regenerate`.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerateRequest {
    pub question_id: QuestionId,
    pub segment_content: String,
    pub question_number: i32,
}

/// Successful regenerate response: the fully-formed replacement row.
#[derive(Debug, Deserialize)]
struct RegenerateResponse {
    question: Question,
}

impl QuizApi {
    /// Create a client for the given API base URL (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Submit a video URL for processing.
    ///
    /// Returns the created job row (status `pending`); the backend
    /// advances it from there.
    pub async fn transcribe(&self, url: &str, token: &str) -> Result<Video, QuizApiError> {
        let endpoint = format!("{}/api/transcript/transcribe", self.base_url);
        tracing::debug!(%endpoint, "Submitting video for transcription");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(token)
            .json(&TranscribeRequest { url })
            .send()
            .await?;

        let body: TranscribeResponse =
            Self::parse_response(response, "Failed to create video").await?;
        Ok(body.video)
    }

    /// Regenerate one question from its segment's content.
    ///
    /// Returns the replacement question row; the caller patches it into
    /// local state by id.
    pub async fn regenerate(
        &self,
        request: &RegenerateRequest,
        token: &str,
    ) -> Result<Question, QuizApiError> {
        let endpoint = format!("{}/api/questions/regenerate", self.base_url);
        tracing::debug!(%endpoint, question_id = %request.question_id, "Regenerating question");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let body: RegenerateResponse =
            Self::parse_response(response, "Failed to regenerate question").await?;
        Ok(body.question)
    }

    // ---- private helpers ----

    /// Parse a JSON response body, mapping non-2xx statuses to
    /// [`QuizApiError::Api`] via [`failure_message`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T, QuizApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuizApiError::Api {
                status: status.as_u16(),
                message: failure_message(action, status.as_u16(), &body),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Error body shape the API uses for failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Map a failure body to a user-facing message.
///
/// The API reports errors as JSON `{"error": "..."}`; anything else
/// (proxies, load balancers) may send plain text, which collapses to
/// the action name with the status code.
fn failure_message(action: &str, status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => format!("{action}: {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_body_wins() {
        let msg = failure_message("Failed to create video", 422, r#"{"error":"bad url"}"#);
        assert_eq!(msg, "bad url");
    }

    #[test]
    fn plain_text_body_falls_back_to_status() {
        let msg = failure_message("Failed to create video", 502, "Bad Gateway");
        assert_eq!(msg, "Failed to create video: 502");
    }

    #[test]
    fn empty_json_error_falls_back_to_status() {
        let msg = failure_message("Failed to regenerate question", 500, r#"{"error":""}"#);
        assert_eq!(msg, "Failed to regenerate question: 500");
    }
}
