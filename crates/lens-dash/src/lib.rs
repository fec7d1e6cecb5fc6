//! Dashboard core for stocklens
//!
//! This crate implements the search/insight orchestration behind the stock
//! lookup dashboard:
//!
//! - [`gateway::DataGateway`]: typed HTTP wrapper over the analytics backend
//!   with bearer-token auth and typed failures
//! - [`store::SessionStore`]: the single shared view state (current query,
//!   search session, automation overlay)
//! - [`search::SearchOrchestrator`]: drives the mandatory primary fetch
//!   group and the two independently-failing secondary fetches
//! - [`automation::AutomationSequencer`]: the cancellable scripted sequence
//!   (highlight, type, dispatch) behind assistant-triggered searches
//! - [`bridge`]: the assistant-facing context providers and the
//!   `searchTicker` action
//!
//! [`app::Dashboard`] assembles all of the above.
//!
//! # Example
//!
//! ```rust,ignore
//! use lens_dash::app::Dashboard;
//! use lens_dash::config::DashConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashConfig::default().with_env_api_base();
//!     let dashboard = Dashboard::new(&config)?;
//!
//!     dashboard.search("AAPL").await;
//!     if let Some(session) = dashboard.store().session().await {
//!         println!("{:?}: {} rows", session.status, session.ohlcv.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod automation;
pub mod bridge;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod search;
pub mod store;

pub use app::Dashboard;
pub use automation::{AutomationSequencer, AutomationSurface, SearchDispatch};
pub use config::DashConfig;
pub use error::{DashError, Result};
pub use gateway::{DataGateway, StockBackend};
pub use search::SearchOrchestrator;
pub use store::SessionStore;
