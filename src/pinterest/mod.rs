//! Client for the Pinterest v5 pin search endpoint.

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::models::RawPin;

/// Substring of the token value shipped in `.env.example`.
pub const PLACEHOLDER_TOKEN: &str = "your_pinterest_access_token";
pub const USER_AGENT: &str = concat!("printpress-server/", env!("CARGO_PKG_VERSION"));

/// Upstream bodies are kept for diagnostics; this caps how much.
const MAX_DIAGNOSTIC_BODY: usize = 512;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Pinterest access token not configured")]
    NotConfigured,

    #[error("Pinterest request failed: {body}")]
    RequestFailed {
        /// `None` for transport failures and timeouts.
        status: Option<u16>,
        body: String,
    },
}

/// Anything that can answer a pin search. Implemented by [`PinterestClient`];
/// tests substitute canned sources.
#[async_trait]
pub trait PinSource: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<RawPin>, UpstreamError>;
}

#[derive(Clone)]
pub struct PinterestClient {
    http: ReqwestClient,
    base_url: String,
    access_token: Option<String>,
}

impl PinterestClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = ReqwestClient::builder()
            .timeout(config.pinterest_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.pinterest_api_base.clone(),
            access_token: config.pinterest_access_token.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        usable_token(self.access_token.as_deref()).is_some()
    }
}

#[async_trait]
impl PinSource for PinterestClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<RawPin>, UpstreamError> {
        let token = usable_token(self.access_token.as_deref()).ok_or(UpstreamError::NotConfigured)?;

        // /v5/search/pins searches the authenticated user's own pins; standard
        // access cannot search the public feed.
        let url = format!(
            "{}/search/pins?query={}&page_size={}",
            self.base_url,
            urlencoding::encode(query),
            limit,
        );

        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, "Failed to contact Pinterest API");
                transport_error(&e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::warn!(error = ?e, "Failed to read Pinterest API response");
            transport_error(&e)
        })?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Pinterest API returned error status");
            return Err(UpstreamError::RequestFailed {
                status: Some(status.as_u16()),
                body: truncate(&body),
            });
        }

        parse_search_body(&body)
    }
}

fn usable_token(token: Option<&str>) -> Option<&str> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.contains(PLACEHOLDER_TOKEN))
}

fn transport_error(e: &reqwest::Error) -> UpstreamError {
    let body = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    UpstreamError::RequestFailed { status: None, body }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_DIAGNOSTIC_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    /// v5
    items: Option<Vec<Value>>,
    /// v1
    data: Option<Vec<Value>>,
}

/// Decode a search response body. Items that are not pin-shaped are skipped
/// rather than failing the whole page.
pub fn parse_search_body(body: &str) -> Result<Vec<RawPin>, UpstreamError> {
    let envelope: SearchEnvelope =
        serde_json::from_str(body).map_err(|e| UpstreamError::RequestFailed {
            status: None,
            body: format!("invalid response body: {e}"),
        })?;

    let items = envelope.items.or(envelope.data).unwrap_or_default();
    let total = items.len();

    let pins: Vec<RawPin> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawPin>(item) {
            Ok(pin) => Some(pin),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed pin in Pinterest response");
                None
            }
        })
        .collect();

    tracing::debug!(total, parsed = pins.len(), "Parsed Pinterest search response");
    Ok(pins)
}
