//! vidscribe — egui/eframe application and host flow controller.
//!
//! # Architecture
//!
//! [`VidScribeApp`] is the top-level [`eframe::App`].  It owns the three
//! screens of the flow and the [`TranscriptionStep`] instance, and it is the
//! host that consumes the step's [`FlowSignal`]s:
//!
//! ```text
//! Screen::Link ──Continue (cleans link, seeds step)──▶ Screen::Transcribe
//! Screen::Transcribe ──FlowSignal::Completed(text)──▶ Screen::Translate
//!                    ──FlowSignal::Back─────────────▶ Screen::Link
//! Screen::Translate ──back──▶ Screen::Transcribe (step state intact)
//! ```
//!
//! Everything behavioral lives in the step; this module is presentation plus
//! screen routing.

use std::time::Duration;

use eframe::egui;

use crate::step::{FlowSignal, Phase, TranscriptionStep};

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Which screen of the flow is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// Paste the raw video link.
    Link,
    /// The transcription step.
    Transcribe,
    /// Review the forwarded transcript.
    Translate,
}

// ---------------------------------------------------------------------------
// VidScribeApp
// ---------------------------------------------------------------------------

/// eframe application — three-screen video transcription flow.
pub struct VidScribeApp {
    screen: Screen,
    /// Raw link text on the Link screen.
    link_input: String,
    /// Cleaned link produced by the Link screen; seeds the step.
    clean_url: String,
    /// Transcript handed over by the step's forward action.
    forwarded_text: Option<String>,
    step: TranscriptionStep,
}

impl VidScribeApp {
    /// Create the app around an already-wired [`TranscriptionStep`].
    pub fn new(step: TranscriptionStep) -> Self {
        Self {
            screen: Screen::Link,
            link_input: String::new(),
            clean_url: String::new(),
            forwarded_text: None,
            step,
        }
    }

    // ── Screens ──────────────────────────────────────────────────────────

    /// Link screen: raw link in, cleaned link out.
    fn draw_link(&mut self, ui: &mut egui::Ui) {
        ui.heading("Paste a video link");
        ui.add_space(8.0);

        ui.add(
            egui::TextEdit::singleline(&mut self.link_input)
                .hint_text("https://www.tiktok.com/@user/video/...")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);
        let has_link = !self.link_input.trim().is_empty();
        if ui
            .add_enabled(has_link, egui::Button::new("Continue"))
            .clicked()
        {
            self.clean_url = clean_link(&self.link_input);
            self.step.sync_seed(&self.clean_url);
            self.screen = Screen::Transcribe;
        }
    }

    /// Transcription screen; returns the flow signal to route, if any.
    fn draw_transcribe(&mut self, ui: &mut egui::Ui) -> Option<FlowSignal> {
        let mut signal = None;

        ui.heading("Audio transcription");
        ui.label(
            egui::RichText::new("Turn the spoken audio of a video into text")
                .color(egui::Color32::from_rgb(140, 140, 140))
                .size(12.0),
        );
        ui.add_space(8.0);

        // ── URL input + submit ───────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(self.step.url_mut())
                    .hint_text("https://www.tiktok.com/@user/video/...")
                    .desired_width(ui.available_width() - 110.0),
            );

            let label = if self.step.is_transcribing() {
                "Processing..."
            } else {
                "Transcribe"
            };
            let can_submit = self.step.can_submit();
            if ui.add_enabled(can_submit, egui::Button::new(label)).clicked() {
                self.step.submit();
            }
        });

        // ── In-flight / error feedback ───────────────────────────────────
        match self.step.state().phase() {
            Phase::InFlight => {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("Transcribing...")
                            .color(egui::Color32::from_rgb(68, 136, 255)),
                    );
                });
            }
            Phase::Failed => {
                if let Some(message) = &self.step.state().error {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(message)
                            .color(egui::Color32::from_rgb(255, 136, 68)),
                    );
                }
            }
            Phase::Idle | Phase::Succeeded => {}
        }

        // ── Result ───────────────────────────────────────────────────────
        ui.add_space(10.0);
        ui.label(egui::RichText::new("Result").strong());

        let mut result_text = self.step.state().original_text.clone();
        ui.add(
            egui::TextEdit::multiline(&mut result_text)
                .hint_text("The transcript will appear here...")
                .interactive(false)
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );

        // ── Actions ──────────────────────────────────────────────────────
        ui.add_space(6.0);
        let has_result = self.step.has_result();
        ui.horizontal(|ui| {
            if ui.add_enabled(has_result, egui::Button::new("Copy")).clicked() {
                self.step.copy();
            }
            if ui.add_enabled(has_result, egui::Button::new("Clear")).clicked() {
                self.step.clear();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(has_result, egui::Button::new("Translate ▸"))
                    .clicked()
                {
                    signal = self.step.forward();
                }
            });
        });

        ui.add_space(10.0);
        if ui.link("Back to link").clicked() {
            signal = Some(self.step.back());
        }

        signal
    }

    /// Translate screen: shows the forwarded transcript.
    fn draw_translate(&mut self, ui: &mut egui::Ui) {
        ui.heading("Translation");
        ui.add_space(8.0);

        let mut text = self.forwarded_text.clone().unwrap_or_default();
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .interactive(false)
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);
        if ui.button("Back to transcription").clicked() {
            // Step state was never touched by forward, so the transcript is
            // still there.
            self.screen = Screen::Transcribe;
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for VidScribeApp {
    /// Called every frame.  Polls the step, renders the current screen, and
    /// routes any flow signal.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step.poll();

        if self.step.is_transcribing() {
            // Keep polling for the worker's response while in flight.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let signal = egui::CentralPanel::default()
            .show(ctx, |ui| match self.screen {
                Screen::Link => {
                    self.draw_link(ui);
                    None
                }
                Screen::Transcribe => self.draw_transcribe(ui),
                Screen::Translate => {
                    self.draw_translate(ui);
                    None
                }
            })
            .inner;

        match signal {
            Some(FlowSignal::Completed(text)) => {
                self.forwarded_text = Some(text);
                self.screen = Screen::Translate;
            }
            Some(FlowSignal::Back) => {
                self.screen = Screen::Link;
            }
            None => {}
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("vidscribe closing");
    }
}

// ---------------------------------------------------------------------------
// Link cleaning
// ---------------------------------------------------------------------------

/// Normalise a pasted link: trim whitespace and drop the query string
/// (share links carry long tracking parameters the service does not need).
pub fn clean_link(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.find('?') {
        Some(idx) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_link_trims_whitespace() {
        assert_eq!(
            clean_link("  https://tiktok.com/@a/video/1 \n"),
            "https://tiktok.com/@a/video/1"
        );
    }

    #[test]
    fn clean_link_strips_query_string() {
        assert_eq!(
            clean_link("https://tiktok.com/@a/video/1?is_from_webapp=1&sender=pc"),
            "https://tiktok.com/@a/video/1"
        );
    }

    #[test]
    fn clean_link_leaves_plain_links_alone() {
        assert_eq!(
            clean_link("https://tiktok.com/@a/video/1"),
            "https://tiktok.com/@a/video/1"
        );
    }

    #[test]
    fn clean_link_empty_stays_empty() {
        assert_eq!(clean_link("   "), "");
    }
}
