//! Transcription step — URL input, request lifecycle, and result actions.
//!
//! # Architecture
//!
//! ```text
//! seed url ──sync_seed──▶ TranscriptionStep
//!                           │  url (editable)
//!                           │  TranscriptionState (pure reducer, state.rs)
//!                           │
//!                           ├─ submit() ──TranscribeRequest──▶ TranscribeWorker
//!                           ◀─ poll() ◀──TranscribeResponse──┘   (runner.rs)
//!                           │
//!                           ├─ copy()    → ClipboardProvider (best-effort)
//!                           ├─ clear()   → reset to Idle
//!                           ├─ forward() → FlowSignal::Completed(text)
//!                           └─ back()    → FlowSignal::Back
//! ```
//!
//! The host application calls [`TranscriptionStep::poll`] once per frame and
//! routes the returned [`FlowSignal`]s to the next screen.  The step never
//! navigates by itself.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use vidscribe::clipboard::SystemClipboard;
//! use vidscribe::service::{TranscriptionService, DEFAULT_FAILURE_MESSAGE};
//! use vidscribe::step::{TranscribeWorker, TranscriptionStep};
//!
//! # fn make_service() -> Arc<dyn TranscriptionService> { unimplemented!() }
//! #[tokio::main]
//! async fn main() {
//!     let (request_tx, request_rx) = mpsc::channel(16);
//!     let (response_tx, response_rx) = mpsc::channel(16);
//!
//!     tokio::spawn(TranscribeWorker::new(make_service(), request_rx, response_tx).run());
//!
//!     let mut step = TranscriptionStep::new(
//!         "https://tiktok.com/@a/video/1",
//!         DEFAULT_FAILURE_MESSAGE,
//!         request_tx,
//!         response_rx,
//!         Box::new(SystemClipboard),
//!     );
//!
//!     step.submit();
//!     // ... call step.poll() each frame until the state leaves InFlight
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{TranscribeRequest, TranscribeResponse, TranscribeWorker};
pub use state::{Phase, StateEvent, TranscriptionState};

use tokio::sync::mpsc;

use crate::clipboard::ClipboardProvider;

// ---------------------------------------------------------------------------
// FlowSignal
// ---------------------------------------------------------------------------

/// Outbound notification to the host flow controller.
///
/// The step hands these back from [`TranscriptionStep::forward`] and
/// [`TranscriptionStep::back`]; what screen comes next is entirely the
/// host's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowSignal {
    /// The user forwarded the finished transcript to the next step.
    Completed(String),
    /// The user asked to return to the previous step.
    Back,
}

// ---------------------------------------------------------------------------
// TranscriptionStep
// ---------------------------------------------------------------------------

/// One mounted instance of the transcription screen.
///
/// Owns the editable URL, the request/response state machine, and the channel
/// endpoints to the [`TranscribeWorker`].  State lives and dies with the
/// instance; nothing is persisted.
pub struct TranscriptionStep {
    /// Editable URL, seeded from the host's clean URL.
    url: String,
    /// Last seed value observed, so re-seeding only fires on actual change.
    seed_url: String,
    /// The request/response state machine.
    state: TranscriptionState,
    /// Bumped on every submit; responses carrying an older value are stale.
    generation: u64,
    /// Display message for failures that carry no message of their own.
    fallback_error: String,
    request_tx: mpsc::Sender<TranscribeRequest>,
    response_rx: mpsc::Receiver<TranscribeResponse>,
    clipboard: Box<dyn ClipboardProvider>,
}

impl TranscriptionStep {
    /// Create a step seeded with `seed_url`.
    ///
    /// * `fallback_error` — shown when a failure carries no message
    ///   (see [`crate::service::DEFAULT_FAILURE_MESSAGE`]).
    /// * `request_tx` / `response_rx` — channel endpoints shared with a
    ///   [`TranscribeWorker`].
    /// * `clipboard` — destination of the copy action.
    pub fn new(
        seed_url: impl Into<String>,
        fallback_error: impl Into<String>,
        request_tx: mpsc::Sender<TranscribeRequest>,
        response_rx: mpsc::Receiver<TranscribeResponse>,
        clipboard: Box<dyn ClipboardProvider>,
    ) -> Self {
        let seed_url = seed_url.into();
        Self {
            url: seed_url.clone(),
            seed_url,
            state: TranscriptionState::new(),
            generation: 0,
            fallback_error: fallback_error.into(),
            request_tx,
            response_rx,
            clipboard,
        }
    }

    // ── Input holder ─────────────────────────────────────────────────────

    /// Current URL value.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Mutable access for the text-edit widget.  No validation is applied;
    /// an empty string merely disables submit.
    pub fn url_mut(&mut self) -> &mut String {
        &mut self.url
    }

    /// Re-synchronise the local URL from the externally supplied seed.
    ///
    /// One-way binding: whenever the seed value *changes*, the local value is
    /// overwritten — even over a user edit.  A repeated call with the same
    /// seed leaves local edits alone.  The request state machine is not
    /// affected either way.
    pub fn sync_seed(&mut self, seed: &str) {
        if seed != self.seed_url {
            self.seed_url = seed.to_string();
            self.url = self.seed_url.clone();
        }
    }

    // ── State access ─────────────────────────────────────────────────────

    /// Read-only view of the state machine.
    pub fn state(&self) -> &TranscriptionState {
        &self.state
    }

    /// `true` while a request is outstanding.
    pub fn is_transcribing(&self) -> bool {
        self.state.is_transcribing
    }

    /// Submit is available only with a non-empty URL and no request in
    /// flight.  The latter also rules out concurrent double-submission.
    pub fn can_submit(&self) -> bool {
        !self.url.is_empty() && !self.state.is_transcribing
    }

    /// Copy, clear, and forward all require a result to act on.
    pub fn has_result(&self) -> bool {
        self.state.has_result()
    }

    // ── Request lifecycle ────────────────────────────────────────────────

    /// Issue a transcription request for the current URL.
    ///
    /// No-op when [`can_submit`](Self::can_submit) is false: no transition,
    /// no request sent.  Otherwise the previous result and error are cleared
    /// synchronously before the request leaves the step.
    pub fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }

        self.generation += 1;
        self.state.apply(StateEvent::Submitted, &self.fallback_error);

        let request = TranscribeRequest {
            generation: self.generation,
            url: self.url.clone(),
        };

        log::debug!("step: submit (generation {}): {}", self.generation, self.url);

        if let Err(e) = self.request_tx.try_send(request) {
            log::error!("step: could not queue transcription request: {e}");
            self.state
                .apply(StateEvent::Rejected(None), &self.fallback_error);
        }
    }

    /// Drain pending worker responses (non-blocking; call once per frame).
    ///
    /// A response whose generation does not match the current one belongs to
    /// a superseded submit and is discarded without touching the state.
    pub fn poll(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            if response.generation != self.generation {
                log::debug!(
                    "step: dropping stale response (generation {}, current {})",
                    response.generation,
                    self.generation
                );
                continue;
            }

            let event = match response.result {
                Ok(text) => StateEvent::Resolved(text),
                Err(e) => StateEvent::Rejected(e.message),
            };
            self.state.apply(event, &self.fallback_error);
        }
    }

    // ── Action dispatchers ───────────────────────────────────────────────

    /// Copy the current result to the clipboard, best-effort.
    ///
    /// No-op without a result; never changes state.
    pub fn copy(&self) {
        if !self.state.has_result() {
            return;
        }
        self.clipboard.write_text(&self.state.original_text);
    }

    /// Discard the current result and return to the initial Idle state.
    ///
    /// No-op without a result.
    pub fn clear(&mut self) {
        if !self.state.has_result() {
            return;
        }
        self.state.apply(StateEvent::Cleared, &self.fallback_error);
    }

    /// Hand the finished transcript to the host.
    ///
    /// Returns `Some(FlowSignal::Completed(text))` when a result is present,
    /// `None` otherwise.  Local state is left untouched; any follow-up
    /// lifecycle is the host's responsibility.
    pub fn forward(&self) -> Option<FlowSignal> {
        if !self.state.has_result() {
            return None;
        }
        Some(FlowSignal::Completed(self.state.original_text.clone()))
    }

    /// Ask the host to return to the previous step.  Always available.
    pub fn back(&self) -> FlowSignal {
        FlowSignal::Back
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
