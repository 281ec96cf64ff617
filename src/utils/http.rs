use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, Method, Proxy};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{BotError, Result};
use crate::utils::proxy::ProxyPool;

pub const APP_ORIGIN: &str = "https://app.tea-fi.com";
pub const APP_REFERER: &str = "https://app.tea-fi.com/";
pub const APP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Status and decoded body of an API call. Bodies that are not JSON are kept
/// as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// `message` field of an error body, or the body itself when it is a string.
    pub fn message(&self) -> Option<&str> {
        match &self.body {
            Value::String(text) => Some(text.as_str()),
            other => other.get("message").and_then(Value::as_str),
        }
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<ApiResponse>;

    async fn get(&self, url: &str) -> Result<ApiResponse> {
        self.request(Method::GET, url, None).await
    }

    async fn post(&self, url: &str, body: &Value) -> Result<ApiResponse> {
        self.request(Method::POST, url, Some(body)).await
    }
}

/// Appends `key=value` to `base`, keeping any query it already has.
pub fn with_query(base: &str, key: &str, value: &str) -> String {
    match url::Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair(key, value);
            url.to_string()
        }
        Err(_) => {
            let separator = if base.contains('?') { '&' } else { '?' };
            format!("{}{}{}={}", base, separator, key, value)
        }
    }
}

pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ORIGIN, HeaderValue::from_static(APP_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(APP_REFERER));
    headers.insert(USER_AGENT, HeaderValue::from_static(APP_USER_AGENT));
    headers
}

fn build_client(timeout: Duration, proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .default_headers(default_headers());
    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    Ok(builder.build()?)
}

/// reqwest-backed client. With a proxy pool it keeps one client per proxy and
/// every request takes the next one round-robin.
pub struct ReqwestHttpClient {
    direct: Client,
    proxied: Vec<Client>,
    pool: Option<Arc<ProxyPool>>,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, pool: Option<Arc<ProxyPool>>) -> Result<Self> {
        let proxied = match &pool {
            Some(pool) => pool
                .endpoints()
                .iter()
                .map(|endpoint| build_client(timeout, Some(endpoint)))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            direct: build_client(timeout, None)?,
            proxied,
            pool,
        })
    }

    pub fn proxy_pool(&self) -> Option<&ProxyPool> {
        self.pool.as_deref()
    }

    fn pick_client(&self) -> (&Client, Option<&str>) {
        match &self.pool {
            Some(pool) => {
                let index = pool.next_index();
                (&self.proxied[index], Some(pool.endpoints()[index].as_str()))
            }
            None => (&self.direct, None),
        }
    }
}

async fn read_response(response: reqwest::Response) -> Result<ApiResponse> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    Ok(ApiResponse { status, body })
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<ApiResponse> {
        let (client, proxy) = self.pick_client();
        tracing::debug!(%method, url, proxy = proxy.unwrap_or("direct"), "api request");

        let mut request = client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| {
            let is_network_error = e.is_timeout() || e.is_connect() || e.is_request();
            if is_network_error {
                BotError::Transport(format!("{} ({})", e, proxy.unwrap_or("direct")))
            } else {
                BotError::Http(e)
            }
        })?;

        let api_response = read_response(response).await?;
        tracing::debug!(status = api_response.status, url, "api response");
        Ok(api_response)
    }
}
