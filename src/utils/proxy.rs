use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{BotError, Result};

/// Ordered proxy list with a round-robin cursor. No health checking: a dead
/// proxy keeps its slot in the rotation.
#[derive(Debug)]
pub struct ProxyPool {
    endpoints: Vec<String>,
    cursor: AtomicUsize,
}

/// `host:port` becomes `http://host:port`; entries that already carry a
/// scheme are kept as written.
pub fn normalize_proxy(entry: &str) -> Result<String> {
    let entry = entry.trim();
    let with_scheme = if entry.contains("://") {
        entry.to_string()
    } else {
        format!("http://{}", entry)
    };
    let parsed = url::Url::parse(&with_scheme).map_err(|e| BotError::InvalidProxy {
        entry: entry.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BotError::InvalidProxy {
            entry: entry.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(BotError::InvalidProxy {
            entry: entry.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(with_scheme)
}

impl ProxyPool {
    pub fn new(endpoints: Vec<String>) -> Result<ProxyPool> {
        if endpoints.is_empty() {
            return Err(BotError::EmptyProxyPool("no proxies configured".into()));
        }
        Ok(ProxyPool {
            endpoints,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Parses newline-separated proxies; blank lines are ignored.
    pub fn parse(text: &str) -> Result<ProxyPool> {
        let endpoints = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(normalize_proxy)
            .collect::<Result<Vec<_>>>()?;
        Self::new(endpoints)
    }

    pub fn load(path: &Path) -> Result<ProxyPool> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map_err(|e| match e {
            BotError::EmptyProxyPool(_) => {
                BotError::EmptyProxyPool(format!("{} has no proxy entries", path.display()))
            }
            other => other,
        })
    }

    /// Index of the proxy the next request will use; advances the cursor.
    pub fn next_index(&self) -> usize {
        self.cursor.fetch_add(1, Ordering::Relaxed) % self.endpoints.len()
    }

    pub fn next(&self) -> &str {
        &self.endpoints[self.next_index()]
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
