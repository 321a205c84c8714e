use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, error};

use super::{Transport, TransportError};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn truncate_for_log(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        let mut cut = max_len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push('…');
    }
    s
}

/// reqwest-backed transport for the REST catalog.
///
/// Endpoints consumed by the catalog core:
/// - GET /products/category/{slug} - products of one category
/// - GET /products/{id} - a single product
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: Option<&str>, timeout_secs: Option<u64>) -> anyhow::Result<Self> {
        Self::with_user_agent(
            base_url,
            timeout_secs,
            concat!("catalogo/", env!("CARGO_PKG_VERSION")),
        )
    }

    pub fn with_user_agent(
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> anyhow::Result<Self> {
        let base_url = base_url
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("http") {
            anyhow::bail!("catalog base URL must be http(s), got {base_url:?}");
        }
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
            .build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch(&self, url: &str) -> Result<Value, TransportError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            // The catalog explains failures as `{"message": "..."}`.
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
            debug!(%status, body = %truncate_for_log(body, 2000), "catalog error body");
            return Err(TransportError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let res = self.fetch(&url).await;
        if let Err(err) = &res {
            error!(path, error = %err, "API Error");
        }
        res
    }
}
