//! vidscribe — paste a video link, get a transcript, send it onward.
//!
//! A small desktop flow built on egui/eframe: a link screen, a transcription
//! step backed by a remote AI service, and a translation review screen.
//!
//! # Module map
//!
//! * [`step`] — the transcription step: URL input, the request/response
//!   state machine, and the async worker that talks to the service.
//! * [`service`] — the `TranscriptionService` trait and the Gemini-backed
//!   remote implementation.
//! * [`clipboard`] — best-effort clipboard writes behind a trait seam.
//! * [`config`] — TOML-persisted application settings.
//! * [`app`] — the eframe application hosting the screens.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod service;
pub mod step;
