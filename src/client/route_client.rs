//! Routing service client
//!
//! Talks to a running routing service and checks that its route tables
//! match the greedy binning for synthetic recipient lists.

use crate::error::{Error, Result};
use crate::routing::{verify_routes, RouteResponse, TierCounts};
use crate::types::Recipient;
use crate::validate::RouteRequest;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Prefix of generated test phone numbers
pub const SYNTHETIC_PREFIX: &str = "+1555555";

/// Configuration for the routing client
#[derive(Debug, Clone)]
pub struct RouteClientConfig {
    /// Base URL of the service, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for RouteClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("recipient-router/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RouteClientConfig {
    /// Config for a service at `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the routing service
#[derive(Debug, Clone)]
pub struct RouteClient {
    client: Client,
    base_url: Url,
}

impl RouteClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(RouteClientConfig::new(base_url))
    }

    /// Create a client from a config
    pub fn with_config(config: RouteClientConfig) -> Result<Self> {
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request a route table
    pub async fn route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        let url = self.base_url.join("route")?;
        debug!("POST {} ({} recipients)", url, request.recipients.len());

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), error_message(&body)));
        }

        Ok(response.json().await?)
    }

    /// Check the service health endpoint
    pub async fn health(&self) -> Result<bool> {
        let url = self.base_url.join("health")?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }

        let body: Value = response.json().await?;
        Ok(body.get("status").and_then(Value::as_str) == Some("ok"))
    }
}

/// Pull the `error` field out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// Verification
// ============================================================================

/// Generate `count` distinct fake phone numbers, `+15555550000` onwards
pub fn synthetic_recipients(count: usize) -> Vec<Recipient> {
    (0..count)
        .map(|index| format!("{SYNTHETIC_PREFIX}{index:04}"))
        .collect()
}

/// Outcome of one verified request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Number of recipients sent
    pub recipients: usize,
    /// Routes observed per tier
    pub counts: TierCounts,
}

/// Send 1..=`max_recipients` synthetic recipients and verify every response
///
/// Stops at the first failing request. When `expected_message` is given the
/// response `message` must match it exactly.
pub async fn verify_server(
    client: &RouteClient,
    message: &str,
    max_recipients: usize,
    expected_message: Option<&str>,
) -> Result<Vec<VerifyOutcome>> {
    let mut outcomes = Vec::with_capacity(max_recipients);

    for count in 1..=max_recipients {
        let request = RouteRequest::new(message, synthetic_recipients(count));
        let response = client.route(&request).await?;

        if let Some(expected) = expected_message {
            if response.message != expected {
                return Err(Error::verification(
                    count,
                    format!(
                        "expected message '{expected}', received '{}'",
                        response.message
                    ),
                ));
            }
        }

        if !response.routes.recipients().eq(request.recipients.iter()) {
            return Err(Error::verification(
                count,
                "recipients were reordered, lost or duplicated",
            ));
        }

        let counts = verify_routes(count, &response.routes)?;
        debug!("{} recipients -> {} routes", count, counts.total());
        outcomes.push(VerifyOutcome {
            recipients: count,
            counts,
        });
    }

    info!("Verified {} requests against {}", outcomes.len(), client.base_url());
    Ok(outcomes)
}
