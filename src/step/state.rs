//! Transcription state machine — the pure reducer behind the step.
//!
//! [`TranscriptionState`] holds everything the transcription screen needs to
//! render: the last successful transcript, the in-flight flag, and the last
//! failure message.  All transitions go through [`TranscriptionState::apply`],
//! a pure state-transition function with no side effects; the step wires its
//! effects (channel sends, clipboard writes) around it.
//!
//! The state machine transitions are:
//!
//! ```text
//! Idle / Succeeded / Failed ──Submitted──▶ InFlight
//! InFlight ──Resolved(text)──▶ Succeeded   (Idle when text is empty)
//! InFlight ──Rejected(msg)───▶ Failed
//! Succeeded ──Cleared────────▶ Idle
//! ```
//!
//! Invariants:
//! - `is_transcribing` and `error.is_some()` are never both true.
//! - `Submitted` resets `original_text` and `error` in the same transition,
//!   so stale output never displays next to a fresh in-flight request.

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The four observable phases of the transcription screen.
///
/// Derived from [`TranscriptionState`] rather than stored, so the fields and
/// the phase can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request outstanding, no error; a result may or may not be present
    /// — an empty result keeps the screen in `Idle`.
    Idle,
    /// A request has been sent and no response has been received yet.
    InFlight,
    /// The last request resolved with a non-empty transcript.
    Succeeded,
    /// The last request failed; `error` holds the display message.
    Failed,
}

// ---------------------------------------------------------------------------
// TranscriptionState
// ---------------------------------------------------------------------------

/// State of one transcription request/response cycle.
///
/// Created fresh per step instance and discarded with it; nothing here is
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptionState {
    /// Last successfully transcribed text; empty means "no result".
    pub original_text: String,
    /// `true` while a request is outstanding.
    pub is_transcribing: bool,
    /// Last failure message; `None` means "no error".
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// StateEvent
// ---------------------------------------------------------------------------

/// Inputs to the reducer.  Guards (non-empty url, not already in flight,
/// result present) live in the step; by the time an event reaches `apply`
/// it is unconditional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// A request was issued.  Clears any previous result and error.
    Submitted,
    /// The outstanding request resolved with the given transcript.
    Resolved(String),
    /// The outstanding request failed; `None` means the failure carried no
    /// usable message.
    Rejected(Option<String>),
    /// The user discarded the current result.
    Cleared,
}

impl TranscriptionState {
    /// The initial (and post-`Cleared`) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the current [`Phase`] from the fields.
    pub fn phase(&self) -> Phase {
        if self.is_transcribing {
            Phase::InFlight
        } else if self.error.is_some() {
            Phase::Failed
        } else if !self.original_text.is_empty() {
            Phase::Succeeded
        } else {
            Phase::Idle
        }
    }

    /// `true` when a transcript is available to copy, clear, or forward.
    pub fn has_result(&self) -> bool {
        !self.original_text.is_empty()
    }

    /// Apply `event`, mutating the state in place.
    ///
    /// `fallback` is the display message substituted when a rejection carries
    /// no message of its own.
    pub fn apply(&mut self, event: StateEvent, fallback: &str) {
        match event {
            StateEvent::Submitted => {
                self.original_text.clear();
                self.error = None;
                self.is_transcribing = true;
            }
            StateEvent::Resolved(text) => {
                self.original_text = text;
                self.is_transcribing = false;
                self.error = None;
            }
            StateEvent::Rejected(message) => {
                self.original_text.clear();
                self.is_transcribing = false;
                self.error = Some(message.unwrap_or_else(|| fallback.to_string()));
            }
            StateEvent::Cleared => {
                *self = Self::new();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Transcription failed";

    fn in_flight() -> TranscriptionState {
        let mut state = TranscriptionState::new();
        state.apply(StateEvent::Submitted, FALLBACK);
        state
    }

    // ---- initial state ----

    #[test]
    fn initial_state_is_idle_and_empty() {
        let state = TranscriptionState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.original_text, "");
        assert!(!state.is_transcribing);
        assert!(state.error.is_none());
    }

    // ---- Submitted ----

    #[test]
    fn submitted_enters_in_flight_with_clean_slate() {
        let mut state = TranscriptionState {
            original_text: "old result".into(),
            is_transcribing: false,
            error: Some("old error".into()),
        };

        state.apply(StateEvent::Submitted, FALLBACK);

        assert_eq!(state.phase(), Phase::InFlight);
        assert_eq!(state.original_text, "");
        assert!(state.error.is_none());
    }

    // ---- Resolved ----

    #[test]
    fn resolved_stores_text_and_leaves_flight() {
        let mut state = in_flight();
        state.apply(StateEvent::Resolved("hello world".into()), FALLBACK);

        assert_eq!(state.phase(), Phase::Succeeded);
        assert_eq!(state.original_text, "hello world");
        assert!(!state.is_transcribing);
        assert!(state.error.is_none());
    }

    #[test]
    fn resolved_with_empty_text_is_idle_not_failed() {
        let mut state = in_flight();
        state.apply(StateEvent::Resolved(String::new()), FALLBACK);

        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.error.is_none());
    }

    // ---- Rejected ----

    #[test]
    fn rejected_stores_message_and_clears_text() {
        let mut state = in_flight();
        state.apply(StateEvent::Rejected(Some("invalid link".into())), FALLBACK);

        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.error.as_deref(), Some("invalid link"));
        assert_eq!(state.original_text, "");
        assert!(!state.is_transcribing);
    }

    #[test]
    fn rejected_without_message_uses_fallback() {
        let mut state = in_flight();
        state.apply(StateEvent::Rejected(None), FALLBACK);

        assert_eq!(state.error.as_deref(), Some(FALLBACK));
    }

    // ---- Cleared ----

    #[test]
    fn cleared_equals_initial_state_exactly() {
        let mut state = in_flight();
        state.apply(StateEvent::Resolved("text".into()), FALLBACK);
        state.apply(StateEvent::Cleared, FALLBACK);

        assert_eq!(state, TranscriptionState::new());
    }

    // ---- invariants ----

    #[test]
    fn in_flight_and_error_are_never_both_set() {
        let mut state = TranscriptionState::new();
        let events = [
            StateEvent::Submitted,
            StateEvent::Rejected(Some("x".into())),
            StateEvent::Submitted,
            StateEvent::Resolved("y".into()),
            StateEvent::Cleared,
            StateEvent::Submitted,
            StateEvent::Rejected(None),
        ];

        for event in events {
            state.apply(event, FALLBACK);
            assert!(
                !(state.is_transcribing && state.error.is_some()),
                "invariant violated at {state:?}"
            );
        }
    }

    #[test]
    fn has_result_tracks_original_text() {
        let mut state = in_flight();
        assert!(!state.has_result());
        state.apply(StateEvent::Resolved("t".into()), FALLBACK);
        assert!(state.has_result());
    }
}
