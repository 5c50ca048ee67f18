//! HTTP transport adapter for the engine
//!
//! Thin wrapper around `reqwest` with a fixed per-call timeout. Success is
//! classified by the caller; this layer only distinguishes "got a response"
//! from a transport failure. Retries are off by default and opt-in through
//! [`RetryPolicy`], so neither the translator nor the chunker ever needs to
//! know about resilience.

use crate::config::{EngineConfig, RetryConfig};
use crate::error::GatewayError;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, warn};

/// One outbound engine call
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub method: Method,
    /// Path relative to the engine base URL, e.g. `/chotel/chotel_type/_search`
    pub path: String,
    pub body: Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    None,
    Json(Value),
    /// Newline-delimited JSON (`_bulk` payloads)
    Ndjson(String),
}

impl EngineRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: Body::None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: Body::None,
        }
    }

    pub fn put_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Body::Json(body),
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Body::Json(body),
        }
    }

    pub fn post_ndjson(path: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Body::Ndjson(body),
        }
    }
}

/// Status and raw body of an engine response
#[derive(Debug, Clone)]
pub struct EngineResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam between the services and the wire
///
/// Services depend on this trait so that batching and failure aggregation
/// can be exercised without a live engine.
#[async_trait]
pub trait EngineTransport: Send + Sync {
    async fn execute(&self, request: EngineRequest) -> Result<EngineResponse>;
}

/// Retry behaviour applied around each transport call
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.backoff_ms),
        }
    }
}

/// `reqwest`-backed engine client with a fixed timeout
pub struct EngineClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl EngineClient {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::from(&config.retry),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, request: &EngineRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Put => self.http.put(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        match &request.body {
            Body::None => builder,
            Body::Json(value) => builder.json(value),
            Body::Ndjson(payload) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload.clone()),
        }
    }

    async fn send_once(&self, request: &EngineRequest) -> Result<EngineResponse> {
        let response = self
            .build(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(EngineResponse { status, body })
    }
}

/// Run `call` up to `policy.max_attempts` times with a fixed sleep between
/// attempts, returning the first success or the last error.
async fn with_retry<F, Fut>(policy: &RetryPolicy, path: &str, mut call: F) -> Result<EngineResponse>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<EngineResponse>>,
{
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(response) => return Ok(response),
            Err(err) if attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    path = %path,
                    "engine call failed, retrying: {err}"
                );
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
            Err(err) => {
                error!(path = %path, "engine call failed: {err}");
                return Err(err);
            }
        }
    }
}

#[async_trait]
impl EngineTransport for EngineClient {
    async fn execute(&self, request: EngineRequest) -> Result<EngineResponse> {
        with_retry(&self.retry, &request.path, || self.send_once(&request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_with_retry_exhausts_max_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            backoff: Duration::ZERO,
        };
        let attempts = AtomicU32::new(0);
        let result = with_retry(&policy, "/idx/t/1", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(GatewayError::Transport("connection refused".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_stops_on_first_success() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff: Duration::ZERO,
        };
        let attempts = AtomicU32::new(0);
        let result = with_retry(&policy, "/idx", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 2 {
                    Err(GatewayError::Transport("connection reset".to_string()))
                } else {
                    Ok(EngineResponse {
                        status: 200,
                        body: "{}".to_string(),
                    })
                }
            }
        })
        .await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_default_policy_makes_a_single_attempt() {
        let attempts = AtomicU32::new(0);
        let result = with_retry(&RetryPolicy::default(), "/idx", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(GatewayError::Transport("refused".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = RetryConfig {
            max_attempts: 3,
            backoff_ms: 250,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_retry_policy_floor_is_one_attempt() {
        let config = RetryConfig {
            max_attempts: 0,
            backoff_ms: 0,
        };
        assert_eq!(RetryPolicy::from(&config).max_attempts, 1);
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = EngineConfig {
            base_url: "http://127.0.0.1:9200/".to_string(),
            ..Default::default()
        };
        let client = EngineClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9200");
    }

    #[test]
    fn test_request_constructors() {
        let req = EngineRequest::put_json("/idx", json!({"settings": {}}));
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.path, "/idx");
        assert!(matches!(req.body, Body::Json(_)));

        let req = EngineRequest::post_ndjson("/idx/t/_bulk", "{}\n\n".to_string());
        assert!(matches!(req.body, Body::Ndjson(_)));

        let req = EngineRequest::get("/_template");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.body, Body::None);
    }
}
