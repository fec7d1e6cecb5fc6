//! Dashboard assembly
//!
//! Wires the store, gateway, orchestrator, and sequencer together and
//! registers the assistant-facing bridge on an `AssistantSurface`.

use crate::automation::AutomationSequencer;
use crate::bridge::{ContextSection, SearchTickerAction, SessionContext};
use crate::config::DashConfig;
use crate::error::Result;
use crate::gateway::{DataGateway, StockBackend};
use crate::search::SearchOrchestrator;
use crate::store::SessionStore;
use lens_assist::AssistantSurface;
use std::sync::Arc;

/// The assembled dashboard core
pub struct Dashboard {
    store: Arc<SessionStore>,
    orchestrator: Arc<SearchOrchestrator>,
    sequencer: Arc<AutomationSequencer>,
    surface: Arc<AssistantSurface>,
    gateway: Option<Arc<DataGateway>>,
}

impl Dashboard {
    /// Build a dashboard talking to the configured analytics backend
    pub fn new(config: &DashConfig) -> Result<Self> {
        config.validate()?;
        let gateway = Arc::new(DataGateway::new(
            config.api_base.clone(),
            config.request_timeout,
        )?);

        let backend: Arc<dyn StockBackend> = gateway.clone();
        let mut dashboard = Self::assemble(config, backend);
        dashboard.gateway = Some(gateway);
        Ok(dashboard)
    }

    /// Build a dashboard over an arbitrary backend (used by tests)
    pub fn with_backend(config: &DashConfig, backend: Arc<dyn StockBackend>) -> Self {
        Self::assemble(config, backend)
    }

    fn assemble(config: &DashConfig, backend: Arc<dyn StockBackend>) -> Self {
        let store = Arc::new(SessionStore::new());
        let orchestrator = Arc::new(SearchOrchestrator::new(
            backend,
            Arc::clone(&store),
            config.period.clone(),
            config.interval.clone(),
        ));
        let sequencer = Arc::new(AutomationSequencer::new(
            store.clone(),
            orchestrator.clone(),
            config.type_delay,
            config.pause_delay,
        ));

        let surface = Arc::new(AssistantSurface::new());
        for section in ContextSection::ALL {
            surface.register_context(Arc::new(SessionContext::new(
                Arc::clone(&store),
                section,
            )));
        }
        surface.register_action(Arc::new(SearchTickerAction::new(Arc::clone(&sequencer))));

        Self {
            store,
            orchestrator,
            sequencer,
            surface,
            gateway: None,
        }
    }

    /// The shared view state
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// The assistant-facing surface
    pub fn surface(&self) -> &Arc<AssistantSurface> {
        &self.surface
    }

    /// The HTTP gateway, when this dashboard was built against one
    pub fn gateway(&self) -> Option<&Arc<DataGateway>> {
        self.gateway.as_ref()
    }

    /// Run a direct (form-submission style) search
    pub async fn search(&self, raw_ticker: &str) {
        self.orchestrator.search(raw_ticker).await;
    }

    /// Run an assistant-style search through the automation sequence
    pub async fn automate_search(&self, raw_ticker: &str) -> Result<String> {
        self.sequencer.run(raw_ticker).await
    }

    /// Cancel any active automation run
    pub async fn cancel_automation(&self) {
        self.sequencer.cancel().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockStockBackend;
    use crate::model::{OhlcvRow, SearchStatus};
    use serde_json::json;
    use std::time::Duration;

    fn fast_config() -> DashConfig {
        DashConfig::builder()
            .type_delay(Duration::from_millis(1))
            .pause_delay(Duration::from_millis(1))
            .build()
            .unwrap()
    }

    fn rows(n: usize) -> Vec<OhlcvRow> {
        (0..n)
            .map(|i| OhlcvRow {
                date: format!("2024-01-{:02}T00:00:00", i + 1),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.5,
                volume: 1_000,
                sma_20: None,
                sma_50: None,
                sma_200: None,
            })
            .collect()
    }

    #[test]
    fn test_surface_registration() {
        let backend = Arc::new(MockStockBackend::new());
        let dashboard = Dashboard::with_backend(&fast_config(), backend);

        let surface = dashboard.surface();
        assert_eq!(surface.context_count(), 6);
        assert_eq!(surface.action_count(), 1);
        assert!(surface.action("searchTicker").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_assistant_action_runs_full_search() {
        let mut backend = MockStockBackend::new();
        backend
            .expect_fetch_history()
            .returning(|_, _, _| Ok(rows(4)));
        backend.expect_fetch_info().returning(|_| {
            Err(crate::error::DashError::Other("info offline".to_string()))
        });
        backend
            .expect_fetch_insights()
            .returning(|_| Err(crate::error::DashError::Other("offline".to_string())));
        backend
            .expect_fetch_forecast()
            .returning(|_| Err(crate::error::DashError::Other("offline".to_string())));

        let dashboard = Dashboard::with_backend(&fast_config(), Arc::new(backend));

        let result = dashboard
            .surface()
            .invoke("searchTicker", json!({ "ticker": "aapl" }))
            .await
            .unwrap();
        assert_eq!(result, json!("Searched for AAPL"));

        let session = dashboard.store().session().await.unwrap();
        assert_eq!(session.ticker.as_str(), "AAPL");
        assert_eq!(session.status, SearchStatus::Ready);
        assert_eq!(session.ohlcv.len(), 4);

        // The automation overlay never survives into data loading
        assert!(dashboard.store().overlay().await.is_none());
        assert_eq!(dashboard.store().query().await, "AAPL");
    }

    #[tokio::test]
    async fn test_action_rejects_malformed_params() {
        let backend = Arc::new(MockStockBackend::new());
        let dashboard = Dashboard::with_backend(&fast_config(), backend);

        let err = dashboard
            .surface()
            .invoke("searchTicker", json!({ "symbol": "AAPL" }))
            .await
            .unwrap_err();
        assert!(matches!(err, lens_core::Error::InvalidParams(_)));
    }
}
