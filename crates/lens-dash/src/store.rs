//! Shared view state for the dashboard
//!
//! `SessionStore` is the single state container both mutating components
//! (the search orchestrator and the automation sequencer) write into;
//! presentational consumers and the assistant bridge only read it. Every
//! session-scoped mutator takes the `SessionId` it belongs to and silently
//! discards the write when that session is no longer current, so a
//! late-settling fetch from a superseded search can never clobber the
//! replacement.

use crate::automation::AutomationSurface;
use crate::model::{
    AutomationOverlay, CompanyInfo, FocusTarget, ForecastPayload, OhlcvRow, RatingReport,
    SearchSession, SearchStatus, SecondaryStatus, SessionId,
};
use async_trait::async_trait;
use lens_core::Ticker;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ViewState {
    /// Visible text of the search input
    query: String,
    /// Ticker of the last search whose primary group succeeded
    searched_ticker: Option<Ticker>,
    /// The current search session, if any
    session: Option<SearchSession>,
    /// The active automation highlight overlay, if any
    overlay: Option<AutomationOverlay>,
}

/// Mutable view-state holding the current query, result sets, and
/// per-source loading flags. At most one search session and one
/// automation overlay exist at a time.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<ViewState>,
    next_session: AtomicU64,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the current session with a fresh one in
    /// `Loading`. Prior partial results are discarded, and any in-flight
    /// writes keyed to the prior session become no-ops.
    pub async fn begin_search(&self, ticker: Ticker) -> SessionId {
        let id = SessionId(self.next_session.fetch_add(1, Ordering::SeqCst) + 1);

        let mut state = self.state.write().await;
        state.session = Some(SearchSession::loading(id, ticker));
        id
    }

    /// Identity of the current session, if any
    pub async fn current_session(&self) -> Option<SessionId> {
        self.state.read().await.session.as_ref().map(|s| s.id)
    }

    /// Clone of the current session for read-only consumers
    pub async fn session(&self) -> Option<SearchSession> {
        self.state.read().await.session.clone()
    }

    /// Visible text of the search input
    pub async fn query(&self) -> String {
        self.state.read().await.query.clone()
    }

    /// Ticker of the last successful search
    pub async fn searched_ticker(&self) -> Option<Ticker> {
        self.state.read().await.searched_ticker.clone()
    }

    /// Active automation overlay, if any
    pub async fn overlay(&self) -> Option<AutomationOverlay> {
        self.state.read().await.overlay.clone()
    }

    /// Record the primary group's hard failure. The session moves to
    /// `Failed` with the given user-visible message.
    pub async fn fail_primary(&self, id: SessionId, detail: impl Into<String>) -> bool {
        self.mutate_session(id, "fail_primary", |session| {
            session.status = SearchStatus::Failed;
            session.error = Some(detail.into());
        })
        .await
    }

    /// Record the primary group's success: the session becomes `Ready`
    /// and its ticker is remembered as the last searched one.
    pub async fn complete_primary(
        &self,
        id: SessionId,
        ohlcv: Vec<OhlcvRow>,
        info: Option<CompanyInfo>,
    ) -> bool {
        let mut state = self.state.write().await;
        match state.session.as_mut() {
            Some(session) if session.id == id => {
                session.status = SearchStatus::Ready;
                session.ohlcv = ohlcv;
                session.info = info;
                let ticker = session.ticker.clone();
                state.searched_ticker = Some(ticker);
                true
            },
            _ => {
                tracing::debug!(?id, "discarding stale primary result");
                false
            },
        }
    }

    /// Mark the insights fetch as issued
    pub async fn begin_insights(&self, id: SessionId) -> bool {
        self.mutate_session(id, "begin_insights", |session| {
            session.insights_status = SecondaryStatus::Pending;
        })
        .await
    }

    /// Mark the forecast fetch as issued
    pub async fn begin_forecast(&self, id: SessionId) -> bool {
        self.mutate_session(id, "begin_forecast", |session| {
            session.forecast_status = SecondaryStatus::Pending;
        })
        .await
    }

    /// Settle the insights fetch. A failure degrades to absent data and
    /// never touches the primary status.
    pub async fn settle_insights(&self, id: SessionId, report: Option<RatingReport>) -> bool {
        self.mutate_session(id, "settle_insights", |session| {
            session.insights_status = match report {
                Some(_) => SecondaryStatus::Ready,
                None => SecondaryStatus::Failed,
            };
            session.insights = report;
        })
        .await
    }

    /// Settle the forecast fetch
    pub async fn settle_forecast(&self, id: SessionId, forecast: Option<ForecastPayload>) -> bool {
        self.mutate_session(id, "settle_forecast", |session| {
            session.forecast_status = match forecast {
                Some(_) => SecondaryStatus::Ready,
                None => SecondaryStatus::Failed,
            };
            session.forecast = forecast;
        })
        .await
    }

    /// Apply a mutation if `id` still names the current session,
    /// otherwise discard it silently.
    async fn mutate_session<F>(&self, id: SessionId, op: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut SearchSession),
    {
        let mut state = self.state.write().await;
        match state.session.as_mut() {
            Some(session) if session.id == id => {
                mutate(session);
                true
            },
            _ => {
                tracing::debug!(?id, op, "discarding stale session write");
                false
            },
        }
    }
}

/// The automation sequencer's side effects land in the shared view state:
/// the overlay and the visible query text.
#[async_trait]
impl AutomationSurface for SessionStore {
    async fn focus(&self, target: FocusTarget, label: &str) {
        let mut state = self.state.write().await;
        state.overlay = Some(AutomationOverlay {
            target,
            label: label.to_string(),
        });
    }

    async fn set_query(&self, text: &str) {
        let mut state = self.state.write().await;
        state.query = text.to_string();
    }

    async fn clear_overlay(&self) {
        let mut state = self.state.write().await;
        state.overlay = None;
    }
}
