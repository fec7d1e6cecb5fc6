//! Search orchestration
//!
//! One search drives three fetch groups against the shared store: the
//! mandatory primary pair (OHLCV history and company info, joined), and the
//! optional secondary pair (AI ratio insights and price forecast, spawned
//! independently and never awaited). Failure policy per group:
//!
//! - OHLCV failure is hard: the session fails with the server's message and
//!   no secondary fetch is issued.
//! - Company-info failure is soft: the session still becomes `Ready` with
//!   `info = None`.
//! - Secondary failures are soft: logged and swallowed, never a session
//!   error.
//!
//! Every write is keyed to the session the fetch belongs to; results that
//! settle after the session was replaced are discarded by the store.

use crate::automation::SearchDispatch;
use crate::gateway::StockBackend;
use crate::model::SessionId;
use crate::store::SessionStore;
use async_trait::async_trait;
use lens_core::Ticker;
use std::sync::Arc;

/// Drives the fetch groups for one ticker search, updating the store as
/// each resolves.
pub struct SearchOrchestrator {
    backend: Arc<dyn StockBackend>,
    store: Arc<SessionStore>,
    period: String,
    interval: String,
}

impl SearchOrchestrator {
    /// Create an orchestrator over the given backend and store
    pub fn new(
        backend: Arc<dyn StockBackend>,
        store: Arc<SessionStore>,
        period: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            store,
            period: period.into(),
            interval: interval.into(),
        }
    }

    /// Run a search for `raw_ticker`.
    ///
    /// A blank input is a no-op. Returns once the primary fetch group has
    /// settled; the secondary group keeps running in the background.
    /// Failures are recorded on the store, never returned.
    pub async fn search(&self, raw_ticker: &str) {
        let Some(ticker) = Ticker::parse(raw_ticker) else {
            return;
        };

        let id = self.store.begin_search(ticker.clone()).await;
        tracing::info!(%ticker, ?id, "search started");

        // Primary fetch group: both must settle before the session moves
        // out of Loading.
        let (history, info) = tokio::join!(
            self.backend.fetch_history(&ticker, &self.period, &self.interval),
            self.backend.fetch_info(&ticker),
        );

        let rows = match history {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "OHLCV fetch failed");
                self.store.fail_primary(id, err.detail_message()).await;
                return;
            },
        };

        // Company info degrades to absent data
        let info = match info {
            Ok(info) => Some(info),
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "company info unavailable");
                None
            },
        };

        if !self.store.complete_primary(id, rows, info).await {
            // Superseded while the primary group was in flight; the new
            // session owns the store now.
            return;
        }

        self.spawn_secondary(id, ticker).await;
    }

    /// Launch the insights and forecast fetches for session `id`. Each is
    /// independent, non-blocking, and settles through a guarded write.
    async fn spawn_secondary(&self, id: SessionId, ticker: Ticker) {
        self.store.begin_insights(id).await;
        self.store.begin_forecast(id).await;

        let backend = Arc::clone(&self.backend);
        let store = Arc::clone(&self.store);
        let insights_ticker = ticker.clone();
        tokio::spawn(async move {
            let report = match backend.fetch_insights(&insights_ticker).await {
                Ok(report) => Some(report),
                Err(err) => {
                    tracing::warn!(ticker = %insights_ticker, error = %err, "insights fetch failed");
                    None
                },
            };
            store.settle_insights(id, report).await;
        });

        let backend = Arc::clone(&self.backend);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let forecast = match backend.fetch_forecast(&ticker).await {
                Ok(forecast) => Some(forecast),
                Err(err) => {
                    tracing::warn!(%ticker, error = %err, "forecast fetch failed");
                    None
                },
            };
            store.settle_forecast(id, forecast).await;
        });
    }
}

/// The automation sequencer's terminal step runs a real search
#[async_trait]
impl SearchDispatch for SearchOrchestrator {
    async fn dispatch(&self, ticker: &str) {
        self.search(ticker).await;
    }
}
