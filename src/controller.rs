//! Forecast request lifecycle controller
//!
//! Owns the single [`RequestState`] the presentation layer reads. A request
//! moves the state to `Loading`, the fetch runs on a spawned task, and the
//! outcome lands as `Success` or `Error`. Any state re-enters `Loading` on a
//! new request.
//!
//! Overlapping requests are sequenced by token: every outbound request gets
//! a monotonically increasing token, and a response is applied only if its
//! token is still the latest issued. A superseding request therefore can
//! never be overwritten by a stale response, even when the stale response
//! resolves later. In-flight requests are not cancelled at the network
//! level; their results are simply discarded on arrival.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::chart::DashboardView;
use crate::client::ForecastProvider;
use crate::models::{City, RequestState};

/// Owns the request lifecycle and the current [`RequestState`]
pub struct ForecastController {
    provider: Arc<dyn ForecastProvider>,
    /// Single source of truth; readers take snapshots or subscribe
    state_tx: watch::Sender<RequestState>,
    /// Token of the most recently issued request
    latest_token: Arc<AtomicU64>,
}

impl ForecastController {
    /// Create a controller in the `Idle` state
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        let (state_tx, _) = watch::channel(RequestState::Idle);
        Self {
            provider,
            state_tx,
            latest_token: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current request state
    #[must_use]
    pub fn state(&self) -> RequestState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state_tx.subscribe()
    }

    /// Dashboard view derived from the current state, if the last request
    /// succeeded
    #[must_use]
    pub fn dashboard(&self) -> Option<DashboardView> {
        self.state_tx
            .borrow()
            .series()
            .map(DashboardView::from_series)
    }

    /// Issue a forecast request for a city.
    ///
    /// Sets `Loading` synchronously and spawns the fetch; the caller
    /// observes the outcome through [`Self::state`] or [`Self::subscribe`],
    /// not through a return value. The handle is returned so tests can
    /// await completion; dropping it does not cancel the request.
    ///
    /// Exactly one outbound request per call: no deduplication, no queuing.
    pub fn request_forecast(&self, city: City) -> JoinHandle<()> {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;

        info!("Requesting forecast for {} (request #{})", city, token);
        self.state_tx.send_replace(RequestState::Loading { city });

        let provider = Arc::clone(&self.provider);
        let state_tx = self.state_tx.clone();
        let latest_token = Arc::clone(&self.latest_token);

        tokio::spawn(async move {
            let result = provider.fetch_forecast(city).await;

            // A newer request supersedes this one: discard the response
            // instead of overwriting the later request's state.
            if latest_token.load(Ordering::SeqCst) != token {
                warn!(
                    "Discarding stale forecast response for {} (request #{})",
                    city, token
                );
                return;
            }

            match result {
                Ok(series) => {
                    debug!(
                        "Forecast for {} resolved with {} points (request #{})",
                        city,
                        series.len(),
                        token
                    );
                    state_tx.send_replace(RequestState::Success(series));
                }
                Err(e) => {
                    error!("Forecast request for {} failed: {}", city, e);
                    state_tx.send_replace(RequestState::Error {
                        message: e.user_message(),
                    });
                }
            }
        })
    }
}
