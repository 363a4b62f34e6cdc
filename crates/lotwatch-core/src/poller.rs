// ── Refresh loop ──
//
// Fetch -> normalize -> render on a fixed timer. The timer is independent
// of request completion: a slow fetch does not delay the next tick, so two
// cycles may be in flight at once and whichever finishes last wins the
// final view. No sequencing token is used to discard superseded responses.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use lotwatch_api::ApiClient;

use crate::model::Device;
use crate::normalize::normalize_device;
use crate::render::{render_devices, CommandRoutes};

/// Default poll cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// One cycle's output: the status line plus the fully rendered device
/// list. Replaced wholesale every cycle; on failure the body is cleared so
/// stale data is never shown silently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub status: String,
    pub body: String,
    pub device_count: usize,
    /// False when this view came out of a failed cycle (body cleared).
    pub ok: bool,
}

/// Run one fetch -> normalize -> render cycle and produce the view.
///
/// Never fails: transport, HTTP, and shape errors all collapse into a
/// failure view with the error text in the status line and an empty body.
pub async fn poll_once(client: &ApiClient, routes: &CommandRoutes) -> DashboardView {
    match client.fetch_devices().await {
        Ok(records) => {
            let devices: Vec<Device> = records.iter().map(normalize_device).collect();
            debug!(devices = devices.len(), "poll cycle complete");
            DashboardView {
                status: format!("Devices: {}", devices.len()),
                body: render_devices(&devices, routes),
                device_count: devices.len(),
                ok: true,
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to load devices");
            DashboardView {
                status: format!("Failed to load devices: {e}"),
                body: String::new(),
                device_count: 0,
                ok: false,
            }
        }
    }
}

/// Drives [`poll_once`] on a fixed interval and publishes each result into
/// a `watch` channel (last write wins).
pub struct Poller {
    client: Arc<ApiClient>,
    routes: CommandRoutes,
    interval: Duration,
    view_tx: watch::Sender<DashboardView>,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(client: Arc<ApiClient>, routes: CommandRoutes, interval: Duration) -> Self {
        let (view_tx, _) = watch::channel(DashboardView::default());
        Self {
            client,
            routes,
            interval,
            view_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to rendered views. The initial value is the empty default;
    /// the first real view arrives right after the immediate first tick.
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view_tx.subscribe()
    }

    /// Token that stops the timer loop. In-flight cycles are not cancelled;
    /// their late results are simply never observed once receivers go away.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the loop: one cycle immediately, then one per interval tick.
    ///
    /// Each cycle runs in its own task so the timer never waits on the
    /// network. Poll failures only affect the published view; the loop
    /// itself runs until cancelled.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let client = Arc::clone(&self.client);
                    let routes = self.routes.clone();
                    let view_tx = self.view_tx.clone();
                    tokio::spawn(async move {
                        let view = poll_once(&client, &routes).await;
                        let _ = view_tx.send(view);
                    });
                }
            }
        }
        debug!("poller stopped");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> ApiClient {
        #[allow(clippy::unwrap_used)]
        let base = server.uri().parse().unwrap();
        ApiClient::with_client(reqwest::Client::new(), base)
    }

    #[tokio::test]
    async fn successful_poll_renders_and_counts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "deviceId": "lot-a" },
                { "deviceId": "lot-b", "slots": { "available": 0, "occupied": 5 } },
            ])))
            .mount(&server)
            .await;

        let view = poll_once(&client_for(&server).await, &CommandRoutes::default()).await;
        assert_eq!(view.status, "Devices: 2");
        assert_eq!(view.device_count, 2);
        assert!(view.ok);
        assert!(view.body.contains("lot-a"));
        assert!(view.body.contains("lot-b"));
    }

    #[tokio::test]
    async fn http_failure_surfaces_status_and_clears_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(500).set_body_string("device offline"))
            .mount(&server)
            .await;

        let view = poll_once(&client_for(&server).await, &CommandRoutes::default()).await;
        assert!(view.status.contains("500"), "status was: {}", view.status);
        assert!(
            view.status.contains("device offline"),
            "status was: {}",
            view.status
        );
        assert!(view.body.is_empty());
        assert_eq!(view.device_count, 0);
        assert!(!view.ok);
    }

    #[tokio::test]
    async fn non_array_body_is_treated_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": [] })))
            .mount(&server)
            .await;

        let view = poll_once(&client_for(&server).await, &CommandRoutes::default()).await;
        assert!(view.status.starts_with("Failed to load devices:"));
        assert!(view.body.is_empty());
    }

    #[tokio::test]
    async fn run_polls_immediately_and_stops_on_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "deviceId": "lot-a" }])))
            .mount(&server)
            .await;

        let poller = Poller::new(
            Arc::new(client_for(&server).await),
            CommandRoutes::default(),
            Duration::from_secs(60),
        );
        let mut views = poller.subscribe();
        let cancel = poller.cancellation_token();
        let handle = tokio::spawn(poller.run());

        // First cycle fires without waiting for the interval.
        tokio::time::timeout(Duration::from_secs(5), views.changed())
            .await
            .expect("no view published")
            .expect("poller dropped");
        assert_eq!(views.borrow().status, "Devices: 1");

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller did not stop")
            .expect("poller task panicked");
    }
}
