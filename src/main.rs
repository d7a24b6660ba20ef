//! Application entry point — vidscribe.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the remote transcription service ([`GeminiTranscriber`]).
//! 5. Create the request/response channels and spawn the
//!    [`TranscribeWorker`] on the tokio runtime.
//! 6. Build the [`TranscriptionStep`] and the [`VidScribeApp`] around it.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;
use vidscribe::{
    app::VidScribeApp,
    clipboard::SystemClipboard,
    config::AppConfig,
    service::{GeminiTranscriber, TranscriptionService},
    step::{TranscribeWorker, TranscriptionStep},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([560.0, 620.0])
        .with_min_inner_size([420.0, 480.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("vidscribe starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if config.service.api_key.as_deref().unwrap_or("").is_empty() {
        log::warn!(
            "No API key configured — transcription requests will be rejected by the service"
        );
    }

    // 3. Tokio runtime (2 workers is plenty — one request in flight at a time)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Remote transcription service
    let service: Arc<dyn TranscriptionService> =
        Arc::new(GeminiTranscriber::from_config(&config.service));

    // 5. Channels + worker
    let (request_tx, request_rx) = mpsc::channel(16);
    let (response_tx, response_rx) = mpsc::channel(16);

    rt.spawn(TranscribeWorker::new(service, request_rx, response_tx).run());

    // 6. Step + app.  The step starts unseeded; the Link screen seeds it.
    let step = TranscriptionStep::new(
        "",
        &config.service.fallback_error,
        request_tx,
        response_rx,
        Box::new(SystemClipboard),
    );
    let app = VidScribeApp::new(step);

    // 7. Run the UI (blocks until the window is closed)
    eframe::run_native(
        "vidscribe",
        native_options(&config),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
