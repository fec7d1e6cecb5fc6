//! Assistant bridge: view state as queryable context, ticker search as an
//! invocable action
//!
//! Every provider reads `SessionStore` at call time so the assistant always
//! observes the latest state; nothing is cached here. The OHLCV series is
//! deliberately summarized (row count plus first and last row) - the full
//! series never crosses the assistant boundary.

use crate::automation::AutomationSequencer;
use crate::model::{SearchStatus, SecondaryStatus};
use crate::store::SessionStore;
use async_trait::async_trait;
use lens_assist::{AssistantAction, ContextProvider};
use lens_core::{Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Which slice of the view state a provider exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSection {
    /// The text currently typed into the search input
    CurrentQuery,
    /// The last successfully searched ticker
    SearchedTicker,
    /// Row count and first/last row of the loaded OHLCV window
    OhlcvSummary,
    /// Company profile, price, ratios, financials, dividends, analyst blocks
    CompanyInfo,
    /// The AI ratio ratings, or a loading sentinel while pending
    RatioInsights,
    /// The short-horizon price forecast
    PriceForecast,
}

impl ContextSection {
    /// All sections, in registration order
    pub const ALL: [Self; 6] = [
        Self::CurrentQuery,
        Self::SearchedTicker,
        Self::OhlcvSummary,
        Self::CompanyInfo,
        Self::RatioInsights,
        Self::PriceForecast,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::CurrentQuery => "current_query",
            Self::SearchedTicker => "searched_ticker",
            Self::OhlcvSummary => "ohlcv_summary",
            Self::CompanyInfo => "company_info",
            Self::RatioInsights => "ratio_insights",
            Self::PriceForecast => "price_forecast",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::CurrentQuery => "The text currently typed into the ticker search input",
            Self::SearchedTicker => "The ticker symbol of the last successful search",
            Self::OhlcvSummary => {
                "Row count and first/last rows of the loaded price history window"
            },
            Self::CompanyInfo => {
                "Company profile, price levels, valuation ratios, financials, \
                 dividends, and analyst consensus for the current search"
            },
            Self::RatioInsights => "AI-generated ratings of the company's financial ratios",
            Self::PriceForecast => "Short-horizon price forecast with confidence bounds",
        }
    }
}

/// One read-only window onto the session store
pub struct SessionContext {
    store: Arc<SessionStore>,
    section: ContextSection,
}

impl SessionContext {
    /// Expose `section` of `store`
    pub fn new(store: Arc<SessionStore>, section: ContextSection) -> Self {
        Self { store, section }
    }
}

#[async_trait]
impl ContextProvider for SessionContext {
    fn name(&self) -> &str {
        self.section.name()
    }

    fn description(&self) -> &str {
        self.section.description()
    }

    async fn snapshot(&self) -> Value {
        match self.section {
            ContextSection::CurrentQuery => json!(self.store.query().await),
            ContextSection::SearchedTicker => match self.store.searched_ticker().await {
                Some(ticker) => json!(ticker.as_str()),
                None => Value::Null,
            },
            ContextSection::OhlcvSummary => {
                let Some(session) = self.store.session().await else {
                    return Value::Null;
                };
                if session.status != SearchStatus::Ready || session.ohlcv.is_empty() {
                    return Value::Null;
                }
                json!({
                    "ticker": session.ticker.as_str(),
                    "rowCount": session.ohlcv.len(),
                    "first": session.ohlcv.first(),
                    "last": session.ohlcv.last(),
                })
            },
            ContextSection::CompanyInfo => {
                let info = self.store.session().await.and_then(|s| s.info);
                match info {
                    Some(info) => json!(info),
                    None => Value::Null,
                }
            },
            ContextSection::RatioInsights => {
                let Some(session) = self.store.session().await else {
                    return Value::Null;
                };
                match session.insights_status {
                    SecondaryStatus::Pending => json!({ "status": "loading" }),
                    _ => match session.insights {
                        Some(report) => json!(report),
                        None => Value::Null,
                    },
                }
            },
            ContextSection::PriceForecast => {
                let forecast = self.store.session().await.and_then(|s| s.forecast);
                match forecast {
                    Some(forecast) => json!(forecast),
                    None => Value::Null,
                }
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchTickerParams {
    ticker: String,
}

/// The one action the assistant may invoke: search for a ticker through
/// the scripted automation sequence.
pub struct SearchTickerAction {
    sequencer: Arc<AutomationSequencer>,
}

impl SearchTickerAction {
    /// Route `searchTicker` invocations through the given sequencer
    pub fn new(sequencer: Arc<AutomationSequencer>) -> Self {
        Self { sequencer }
    }
}

#[async_trait]
impl AssistantAction for SearchTickerAction {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SearchTickerParams = serde_json::from_value(params)
            .map_err(|e| Error::InvalidParams(e.to_string()))?;

        let message = self
            .sequencer
            .run(&params.ticker)
            .await
            .map_err(|e| Error::ActionFailed(e.to_string()))?;

        Ok(Value::String(message))
    }

    fn name(&self) -> &'static str {
        // Boundary contract name, kept camelCase for the assistant runtime
        "searchTicker"
    }

    fn description(&self) -> &'static str {
        "Search for a stock ticker symbol. Visibly types the symbol into the \
         search field, runs the search, and loads price history, company \
         metrics, AI ratio insights, and a price forecast."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'TSLA')"
                }
            },
            "required": ["ticker"]
        })
    }
}
