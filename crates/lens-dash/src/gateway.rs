//! Typed HTTP gateway for the analytics backend

use crate::error::{DashError, Result};
use crate::model::{CompanyInfo, ForecastPayload, OhlcvRow, RatingReport};
use async_trait::async_trait;
use lens_core::Ticker;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// The four read endpoints the search orchestration consumes.
///
/// `DataGateway` is the production implementation; tests substitute mocks
/// or scripted fakes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockBackend: Send + Sync {
    /// `GET /stock/{ticker}?period=&interval=` - daily OHLCV rows, ascending by date
    async fn fetch_history(
        &self,
        ticker: &Ticker,
        period: &str,
        interval: &str,
    ) -> Result<Vec<OhlcvRow>>;

    /// `GET /stock/{ticker}/info` - company profile, price, ratios, financials
    async fn fetch_info(&self, ticker: &Ticker) -> Result<CompanyInfo>;

    /// `GET /stock/{ticker}/insights` - AI ratio ratings
    async fn fetch_insights(&self, ticker: &Ticker) -> Result<RatingReport>;

    /// `GET /stock/{ticker}/forecast` - short-horizon price forecast
    async fn fetch_forecast(&self, ticker: &Ticker) -> Result<ForecastPayload>;
}

/// Request wrapper attaching bearer-token auth and translating non-success
/// responses into typed failures. One attempt per invocation; retry policy
/// belongs to the caller.
#[derive(Debug)]
pub struct DataGateway {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl DataGateway {
    /// Create a gateway against the given base URL
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        let base_url = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Store a bearer credential to attach to subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    /// Drop the stored credential
    pub fn clear_token(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    fn bearer_token(&self) -> Option<String> {
        let slot = self.token.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    /// Perform one JSON request against the backend.
    ///
    /// Attaches `Authorization: Bearer <token>` when a credential is stored
    /// and omits the header otherwise. A non-2xx response becomes
    /// [`DashError::Http`] carrying the server's `detail` message when the
    /// body is parseable, else a generic `Request failed (<status>)`.
    pub async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "gateway request");

        let mut request = self.client.request(method, &url);
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(failure_from(status, body));
        }

        Ok(response.json().await?)
    }

    /// Register a new account. Supplied for completeness; the dashboard
    /// core only needs the credential that `login` stores.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        self.call(
            Method::POST,
            "/auth/register",
            Some(&json!({ "username": username, "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Log in and store the returned bearer credential on this gateway
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .call(
                Method::POST,
                "/auth/login",
                Some(&json!({ "username": username, "password": password })),
            )
            .await?;

        let token = response
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| DashError::Other("login response missing access_token".to_string()))?;

        self.set_token(token);
        Ok(())
    }

    /// Probe the backend's health endpoint
    pub async fn health(&self) -> Result<bool> {
        let response = self.call(Method::GET, "/health", None).await?;
        Ok(response.get("status").and_then(Value::as_str) == Some("ok"))
    }
}

/// Map a non-success response to a typed failure, preferring the
/// server-provided detail message.
fn failure_from(status: StatusCode, body: Option<Value>) -> DashError {
    let detail = body
        .as_ref()
        .and_then(|b| b.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));

    DashError::Http {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl StockBackend for DataGateway {
    async fn fetch_history(
        &self,
        ticker: &Ticker,
        period: &str,
        interval: &str,
    ) -> Result<Vec<OhlcvRow>> {
        let path = format!("/stock/{ticker}?period={period}&interval={interval}");
        let value = self.call(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn fetch_info(&self, ticker: &Ticker) -> Result<CompanyInfo> {
        let value = self
            .call(Method::GET, &format!("/stock/{ticker}/info"), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn fetch_insights(&self, ticker: &Ticker) -> Result<RatingReport> {
        let value = self
            .call(Method::GET, &format!("/stock/{ticker}/insights"), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn fetch_forecast(&self, ticker: &Ticker) -> Result<ForecastPayload> {
        let value = self
            .call(Method::GET, &format!("/stock/{ticker}/forecast"), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
