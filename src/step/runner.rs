//! Transcription worker — the async bridge between the step and the service.
//!
//! [`TranscribeWorker`] runs as a tokio task.  It receives
//! [`TranscribeRequest`]s over an mpsc channel, performs the single remote
//! round trip, and sends a [`TranscribeResponse`] back tagged with the
//! request's generation number.  The step drops any response whose generation
//! is not the current one, so a late completion from a superseded request (or
//! a discarded step instance) is never acted on.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::service::{TranscribeError, TranscriptionService};

// ---------------------------------------------------------------------------
// Request / response messages
// ---------------------------------------------------------------------------

/// One transcription request, tagged with the step's generation counter.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    /// Value of the step's generation counter when the request was issued.
    pub generation: u64,
    /// The video URL to transcribe, passed through verbatim.
    pub url: String,
}

/// Outcome of one transcription request.
#[derive(Debug, Clone)]
pub struct TranscribeResponse {
    /// Echoed from the request, so the step can discard stale completions.
    pub generation: u64,
    /// Transcript text, or the failure to display.
    pub result: Result<String, TranscribeError>,
}

// ---------------------------------------------------------------------------
// TranscribeWorker
// ---------------------------------------------------------------------------

/// Drives transcription requests against a [`TranscriptionService`].
///
/// Create with [`TranscribeWorker::new`], then spawn [`run`](Self::run) on
/// the tokio runtime.  Requests are processed one at a time; the step's
/// submit guard already prevents more than one being outstanding.
pub struct TranscribeWorker {
    service: Arc<dyn TranscriptionService>,
    request_rx: mpsc::Receiver<TranscribeRequest>,
    response_tx: mpsc::Sender<TranscribeResponse>,
}

impl TranscribeWorker {
    /// Create a new worker.
    ///
    /// * `service`     — transcription backend (e.g. [`GeminiTranscriber`]).
    /// * `request_rx`  — receiver end of the step's request channel.
    /// * `response_tx` — sender end of the step's response channel.
    ///
    /// [`GeminiTranscriber`]: crate::service::GeminiTranscriber
    pub fn new(
        service: Arc<dyn TranscriptionService>,
        request_rx: mpsc::Receiver<TranscribeRequest>,
        response_tx: mpsc::Sender<TranscribeResponse>,
    ) -> Self {
        Self {
            service,
            request_rx,
            response_tx,
        }
    }

    /// Run the worker until the request channel closes.
    ///
    /// Spawned as a tokio task from `main()`.  Also returns when the response
    /// channel closes (the step is gone and nobody can observe a result).
    pub async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            log::debug!(
                "worker: transcribing (generation {}): {}",
                request.generation,
                request.url
            );

            let result = self.service.transcribe(&request.url).await;

            match &result {
                Ok(text) => log::debug!("worker: transcript received ({} chars)", text.len()),
                Err(e) => log::warn!("worker: transcription failed: {e}"),
            }

            let response = TranscribeResponse {
                generation: request.generation,
                result,
            };
            if self.response_tx.send(response).await.is_err() {
                break;
            }
        }

        log::info!("worker: request channel closed, shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockTranscriber;

    fn spawn_channels() -> (
        mpsc::Sender<TranscribeRequest>,
        mpsc::Receiver<TranscribeRequest>,
        mpsc::Sender<TranscribeResponse>,
        mpsc::Receiver<TranscribeResponse>,
    ) {
        let (request_tx, request_rx) = mpsc::channel(4);
        let (response_tx, response_rx) = mpsc::channel(4);
        (request_tx, request_rx, response_tx, response_rx)
    }

    #[tokio::test]
    async fn success_echoes_generation_and_text() {
        let (request_tx, request_rx, response_tx, mut response_rx) = spawn_channels();
        let service: Arc<dyn TranscriptionService> = Arc::new(MockTranscriber::ok("hello world"));

        let worker = TranscribeWorker::new(service, request_rx, response_tx);
        let handle = tokio::spawn(worker.run());

        request_tx
            .send(TranscribeRequest {
                generation: 7,
                url: "https://tiktok.com/@a/video/1".into(),
            })
            .await
            .unwrap();

        let response = response_rx.recv().await.unwrap();
        assert_eq!(response.generation, 7);
        assert_eq!(response.result.unwrap(), "hello world");

        drop(request_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn failure_is_forwarded_with_message() {
        let (request_tx, request_rx, response_tx, mut response_rx) = spawn_channels();
        let service: Arc<dyn TranscriptionService> =
            Arc::new(MockTranscriber::err(TranscribeError::new("invalid link")));

        tokio::spawn(TranscribeWorker::new(service, request_rx, response_tx).run());

        request_tx
            .send(TranscribeRequest {
                generation: 1,
                url: "not-a-url".into(),
            })
            .await
            .unwrap();

        let response = response_rx.recv().await.unwrap();
        let err = response.result.unwrap_err();
        assert_eq!(err.message.as_deref(), Some("invalid link"));
    }

    #[tokio::test]
    async fn run_returns_when_request_channel_closes() {
        let (request_tx, request_rx, response_tx, _response_rx) = spawn_channels();
        let service: Arc<dyn TranscriptionService> = Arc::new(MockTranscriber::ok("x"));

        let handle = tokio::spawn(TranscribeWorker::new(service, request_rx, response_tx).run());

        drop(request_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn run_returns_when_response_channel_closes() {
        let (request_tx, request_rx, response_tx, response_rx) = spawn_channels();
        let service: Arc<dyn TranscriptionService> = Arc::new(MockTranscriber::ok("x"));

        let handle = tokio::spawn(TranscribeWorker::new(service, request_rx, response_tx).run());

        drop(response_rx);
        request_tx
            .send(TranscribeRequest {
                generation: 1,
                url: "https://example.com".into(),
            })
            .await
            .unwrap();

        handle.await.unwrap();
    }
}
