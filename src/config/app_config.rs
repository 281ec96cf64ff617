use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// PolygonScan gas tracker used when `API_URLS.GAS_QUOTE` is not configured.
pub const DEFAULT_GAS_ORACLE_URL: &str =
    "https://api.polygonscan.com/api?module=gastracker&action=gasoracle";

/// Raw `config.json` as shipped with the bot. Field names follow the file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAppConfig {
    #[serde(rename = "RPC_URL")]
    pub rpc_url: String,
    #[serde(rename = "TPOL_ADDRESS")]
    pub tpol_address: String,
    #[serde(rename = "WMATIC_ADDRESS")]
    pub wmatic_address: String,
    #[serde(rename = "APi_TOTAL_POINT", default)]
    pub total_point_url: Option<String>,
    #[serde(rename = "API_URL_CHECK_IN")]
    pub check_in_url: String,
    #[serde(rename = "API_URL_CURRENT")]
    pub check_in_status_url: String,
    #[serde(rename = "API_URLS", default)]
    pub api_urls: HashMap<String, String>,
}

/// Validated configuration with parsed addresses.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rpc_url: String,
    /// Contract exposing `wrap(amount, recipient)`.
    pub wrap_contract: Address,
    /// Token whose balance gates the wrap.
    pub wrapped_token: Address,
    pub total_point_url: Option<String>,
    pub check_in_url: String,
    pub check_in_status_url: String,
    pub transaction_url: String,
    pub gas_quote_url: String,
}

fn parse_address(field: &str, value: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .with_context(|| format!("Invalid {} address in config: {}", field, value))
}

fn validate_url(field: &str, value: &str) -> Result<String> {
    let parsed = url::Url::parse(value.trim())
        .with_context(|| format!("Invalid {} in config: {}", field, value))?;
    if !parsed.scheme().starts_with("http") {
        anyhow::bail!("Invalid {}: must be a valid HTTP/HTTPS URL", field);
    }
    Ok(value.trim().to_string())
}

impl AppConfig {
    pub fn from_raw(raw: RawAppConfig) -> Result<AppConfig> {
        let transaction_url = raw
            .api_urls
            .get("TRANSACTION")
            .context("API_URLS.TRANSACTION is required in config")?;
        let gas_quote_url = raw
            .api_urls
            .get("GAS_QUOTE")
            .map(String::as_str)
            .unwrap_or(DEFAULT_GAS_ORACLE_URL);

        Ok(AppConfig {
            rpc_url: validate_url("RPC_URL", &raw.rpc_url)?,
            wrap_contract: parse_address("TPOL_ADDRESS", &raw.tpol_address)?,
            wrapped_token: parse_address("WMATIC_ADDRESS", &raw.wmatic_address)?,
            total_point_url: raw
                .total_point_url
                .as_deref()
                .map(|url| validate_url("APi_TOTAL_POINT", url))
                .transpose()?,
            check_in_url: validate_url("API_URL_CHECK_IN", &raw.check_in_url)?,
            check_in_status_url: validate_url("API_URL_CURRENT", &raw.check_in_status_url)?,
            transaction_url: validate_url("API_URLS.TRANSACTION", transaction_url)?,
            gas_quote_url: validate_url("API_URLS.GAS_QUOTE", gas_quote_url)?,
        })
    }

    pub fn from_json(text: &str) -> Result<AppConfig> {
        let raw: RawAppConfig = serde_json::from_str(text).context("Malformed config JSON")?;
        Self::from_raw(raw)
    }

    pub fn load(path: &Path) -> Result<AppConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text)
    }
}
