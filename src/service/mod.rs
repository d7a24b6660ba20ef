//! Transcription service module.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │            TranscriptionService (trait)            │
//! │                                                    │
//! │   ┌───────────────────┐                            │
//! │   │ GeminiTranscriber │── reqwest ──▶ remote API   │
//! │   └───────────────────┘                            │
//! │                                                    │
//! │           transcribe(url) → transcript             │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! The trait is deliberately narrow: one async call, one error type.  Every
//! failure — bad link, unsupported platform, network trouble, remote error —
//! surfaces as a [`TranscribeError`] carrying an optional human-readable
//! message.  Callers display the message (or the fallback) and nothing else.

pub mod remote;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use remote::GeminiTranscriber;

use async_trait::async_trait;
use thiserror::Error;

// test-only re-export so the step and runner test modules can import
// MockTranscriber without reaching into a private path.
#[cfg(test)]
pub use mock::MockTranscriber;

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// Fixed message shown when a failure carries no usable description.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Transcription failed";

/// The single error kind of the transcription subsystem.
///
/// No distinction is made between causes (invalid link, unsupported platform,
/// network failure, remote rejection) — only the human-readable message is
/// carried through.  `message` is `None` when the underlying failure had
/// nothing usable to say; `Display` then substitutes
/// [`DEFAULT_FAILURE_MESSAGE`].
#[derive(Debug, Clone, Error)]
#[error("{}", .message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE))]
pub struct TranscribeError {
    /// Human-readable failure description, if the source provided one.
    pub message: Option<String>,
}

impl TranscribeError {
    /// Create an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Create an error with no message — `Display` falls back to
    /// [`DEFAULT_FAILURE_MESSAGE`].
    pub fn unspecified() -> Self {
        Self { message: None }
    }
}

impl From<reqwest::Error> for TranscribeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new("the transcription request timed out")
        } else {
            Self::new(format!("request failed: {e}"))
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptionService trait
// ---------------------------------------------------------------------------

/// Async, object-safe interface for remote transcription backends.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn TranscriptionService>` and called from the worker task.
///
/// # Contract
///
/// - A single asynchronous round trip per call; no retry, no local timeout
///   beyond what the implementation's own HTTP client imposes.
/// - `url` is passed through verbatim — validation is the remote side's job.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Transcribe the video behind `url` and return the transcript text.
    async fn transcribe(&self, url: &str) -> Result<String, TranscribeError>;
}

// Compile-time assertion: Box<dyn TranscriptionService> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn TranscriptionService>) {}
};

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
