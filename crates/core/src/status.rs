//! Processing status of a video job.
//!
//! The backend pipeline owns the status column and advances it as the
//! job moves through processing. The client only ever reads it: the
//! poller keeps going until it observes a terminal status.

use serde::{Deserialize, Serialize};

/// Lifecycle states of a video job, as written by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Pending,
    Downloading,
    Transcribing,
    Segmenting,
    GeneratingQuestions,
    Completed,
    Error,
}

impl VideoStatus {
    /// Parse a status string from the store.
    ///
    /// Returns `None` for statuses this client does not recognise; the
    /// poller treats those as "still processing" rather than failing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "downloading" => Some(Self::Downloading),
            "transcribing" => Some(Self::Transcribing),
            "segmenting" => Some(Self::Segmenting),
            "generating_questions" => Some(Self::GeneratingQuestions),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Transcribing => "transcribing",
            Self::Segmenting => "segmenting",
            Self::GeneratingQuestions => "generating_questions",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Terminal states stop the poller: `completed` or `error`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// Human-readable progress label for a non-terminal status string.
///
/// Unknown or missing statuses fall back to the generic label so the
/// poller never has to fail on a status it does not recognise.
pub fn progress_label(status: &str) -> &'static str {
    match VideoStatus::parse(status) {
        Some(VideoStatus::Downloading) => "Downloading video...",
        Some(VideoStatus::Transcribing) => "Transcribing video...",
        Some(VideoStatus::Segmenting) => "Creating segments...",
        Some(VideoStatus::GeneratingQuestions) => "Generating questions...",
        _ => "Processing...",
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
