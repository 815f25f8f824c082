use crate::state::messages::{NetworkRequest, RefreshTrigger};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Queues a refresh every `period` (120 s unless configured otherwise).
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut refresh_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            let request = NetworkRequest::Refresh { trigger: RefreshTrigger::Timer };
            if self.network_requests.send(request).await.is_err() {
                break;
            }
        }
    }
}
