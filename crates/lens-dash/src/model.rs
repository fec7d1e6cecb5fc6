//! Wire and view-state types for the dashboard
//!
//! The wire types mirror the analytics backend's JSON payloads exactly:
//! OHLCV rows use PascalCase keys (`Date`, `Open`, `SMA_20`), the company
//! info and insight blocks use camelCase.

use chrono::{DateTime, Utc};
use lens_core::Ticker;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One trading day of price history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OhlcvRow {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    #[serde(rename = "SMA_20", default)]
    pub sma_20: Option<f64>,
    #[serde(rename = "SMA_50", default)]
    pub sma_50: Option<f64>,
    #[serde(rename = "SMA_200", default)]
    pub sma_200: Option<f64>,
}

/// Company identity and business summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub full_time_employees: Option<u64>,
    #[serde(default)]
    pub long_business_summary: Option<String>,
}

/// Current and recent price levels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBlock {
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub day_high: Option<f64>,
    #[serde(default)]
    pub day_low: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
}

/// Valuation ratios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioBlock {
    #[serde(default)]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub forward_pe: Option<f64>,
    #[serde(default)]
    pub trailing_peg_ratio: Option<f64>,
    #[serde(default)]
    pub trailing_eps: Option<f64>,
    #[serde(default)]
    pub forward_eps: Option<f64>,
    #[serde(default)]
    pub price_to_book: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
}

/// Revenue, margin, and return figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsBlock {
    #[serde(default)]
    pub market_cap: Option<u64>,
    #[serde(default)]
    pub total_revenue: Option<u64>,
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    #[serde(default)]
    pub profit_margins: Option<f64>,
    #[serde(default)]
    pub operating_margins: Option<f64>,
    #[serde(default)]
    pub gross_margins: Option<f64>,
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    #[serde(default)]
    pub return_on_assets: Option<f64>,
}

/// Dividend policy figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendBlock {
    #[serde(default)]
    pub dividend_rate: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub payout_ratio: Option<f64>,
}

/// Analyst price targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTargets {
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

/// Analyst recommendation counts for the most recent month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(default)]
    pub strong_buy: u32,
    #[serde(default)]
    pub buy: u32,
    #[serde(default)]
    pub hold: u32,
    #[serde(default)]
    pub sell: u32,
    #[serde(default)]
    pub strong_sell: u32,
}

/// Analyst consensus block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystBlock {
    #[serde(default)]
    pub average_rating: Option<String>,
    #[serde(default)]
    pub price_targets: PriceTargets,
    #[serde(default)]
    pub recommendations: Recommendations,
}

/// Company fundamentals as served by `/stock/{ticker}/info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub profile: CompanyProfile,
    #[serde(default)]
    pub price: PriceBlock,
    #[serde(default)]
    pub ratios: RatioBlock,
    #[serde(default)]
    pub financials: FinancialsBlock,
    #[serde(default)]
    pub dividends: DividendBlock,
    #[serde(default)]
    pub analyst: AnalystBlock,
}

/// Rating for a single financial metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRating {
    /// 1-10, None when the underlying metric was unavailable
    pub score: Option<u32>,
    pub label: String,
    pub color: String,
    pub explanation: String,
}

/// AI-generated ratio ratings from `/stock/{ticker}/insights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingReport {
    pub metrics: HashMap<String, MetricRating>,
    pub overall_score: u32,
    pub overall_label: String,
    pub overall_summary: String,
}

/// One forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastPoint {
    pub date: String,
    pub price: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Short-horizon price forecast from `/stock/{ticker}/forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub ticker: String,
    pub model: String,
    pub order: Vec<i32>,
    pub forecast: Vec<ForecastPoint>,
}

/// Identity token for one search session, compared at write time to
/// discard results that arrive after their session was superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

/// Overall state of a search session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    Loading,
    Ready,
    Failed,
}

/// State of one optional enrichment fetch, independent of the primary
/// status and of the other enrichment fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryStatus {
    /// Not issued yet
    Idle,
    /// Issued, not settled
    Pending,
    Ready,
    Failed,
}

/// The unit of work for one user- or assistant-initiated search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSession {
    pub id: SessionId,
    pub ticker: Ticker,
    pub status: SearchStatus,
    pub ohlcv: Vec<OhlcvRow>,
    pub info: Option<CompanyInfo>,
    pub insights: Option<RatingReport>,
    pub insights_status: SecondaryStatus,
    pub forecast: Option<ForecastPayload>,
    pub forecast_status: SecondaryStatus,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl SearchSession {
    /// Create a fresh session in `Loading` with no data attached
    pub fn loading(id: SessionId, ticker: Ticker) -> Self {
        Self {
            id,
            ticker,
            status: SearchStatus::Loading,
            ohlcv: Vec::new(),
            info: None,
            insights: None,
            insights_status: SecondaryStatus::Idle,
            forecast: None,
            forecast_status: SecondaryStatus::Idle,
            error: None,
            started_at: Utc::now(),
        }
    }
}

/// UI element targeted by the automation highlight overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusTarget {
    SearchInput,
    SearchButton,
}

/// The highlight overlay of the currently active automation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationOverlay {
    pub target: FocusTarget,
    pub label: String,
}
