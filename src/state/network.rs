use crate::state::messages::{NetworkRequest, NetworkResponse, RefreshTrigger};
use log::{debug, error};
use sports_feed::Aggregator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the aggregator and runs refresh cycles one at a time. Every trigger
/// (startup, timer, key press) arrives on the same channel, so cycles never
/// overlap and the last snapshot delivered is always the newest.
pub struct NetworkWorker {
    aggregator: Aggregator,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        aggregator: Aggregator,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            aggregator,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let NetworkRequest::Refresh { trigger } = request;
            let skipped = self.drain_queued_refreshes();
            debug!("refresh requested ({trigger:?}), {skipped} queued duplicates dropped");

            self.start_loading_animation().await;
            let snapshot = self.aggregator.refresh().await;
            self.stop_loading_animation(!snapshot.all_sources_failed()).await;

            if let Err(e) = self.responses.send(NetworkResponse::SnapshotLoaded { snapshot }).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    /// Refreshes that piled up while a cycle was running collapse into the next one.
    fn drain_queued_refreshes(&mut self) -> usize {
        let mut skipped = 0;
        while let Ok(NetworkRequest::Refresh { trigger }) = self.requests.try_recv() {
            debug!("coalescing queued {trigger:?} refresh");
            skipped += 1;
        }
        skipped
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Kick off a refresh from anywhere that holds the request sender.
pub async fn request_refresh(network_requests: &mpsc::Sender<NetworkRequest>, trigger: RefreshTrigger) {
    if network_requests.send(NetworkRequest::Refresh { trigger }).await.is_err() {
        error!("network worker is gone; {trigger:?} refresh dropped");
    }
}
