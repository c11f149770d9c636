use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use crate::config::HttpCfg;
use crate::error::{CoreResult, ShipgateError};

/// Failure of one transport call. Carries whatever body the far side
/// returned so the caller can surface it as diagnostic payload; network
/// errors carry an empty body.
#[derive(Debug)]
pub struct TransportError {
    pub message: String,
    pub body: Bytes,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sends a byte payload to a destination address. One call per job; the
/// engine treats the call as opaque blocking I/O and cancels it by dropping
/// the future.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, to: &str, payload: Vec<u8>) -> Result<Bytes, TransportError>;
}

/// Thin wrapper around reqwest::Client with defaults and helpers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    user_agent: String,
}

impl HttpTransport {
    pub fn new_default() -> CoreResult<Self> {
        Self::from_config(&HttpCfg::default())
    }

    pub fn from_config(cfg: &HttpCfg) -> CoreResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms));
        if let Some(cap) = cfg.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(cap);
        }
        let inner = builder
            .build()
            .map_err(|e| ShipgateError::Other(anyhow::anyhow!("http client build failed: {e}")))?;
        Ok(Self {
            inner,
            user_agent: "shipgate/0.1".to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, to: &str, payload: Vec<u8>) -> Result<Bytes, TransportError> {
        let resp = self
            .inner
            .post(to)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.user_agent)
            .body(payload)
            .send()
            .await
            .map_err(|e| TransportError {
                message: format!("request to {to} failed: {e}"),
                body: Bytes::new(),
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| TransportError {
            message: format!("reading response from {to} failed: {e}"),
            body: Bytes::new(),
        })?;

        if !status.is_success() {
            let preview = truncate(&String::from_utf8_lossy(&body), 300);
            return Err(TransportError {
                message: format!("{to} returned status {status}: {preview}"),
                body,
            });
        }
        Ok(body)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        let mut t = s[..max].to_string();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}
