use alloy::primitives::utils::{parse_ether, parse_units};
use alloy::primitives::U256;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_CHAIN_ID: u64 = 137;

#[derive(Debug, Clone)]
pub struct Env {
    /// Raw keys in configuration order; one wallet per entry.
    pub private_keys: Vec<String>,
    pub config_path: PathBuf,
    pub abi_path: PathBuf,
    pub use_proxy: bool,
    pub proxy_file: PathBuf,
    pub min_native_balance: U256,
    pub gas_price_wei: Option<u128>,
    pub chain_id: u64,
    pub request_timeout_ms: u64,
    pub check_in_retry_limit: u32,
    pub loop_delay_seconds: u64,
    pub confirmation_wait_seconds: u64,
    pub log_to_file: bool,
}

fn lookup_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("Invalid {}: expected true/false, got '{}'", key, other),
    }
}

/// Splits the comma-separated `PRIVATE_KEY` value, dropping blanks and
/// normalising the `0x` prefix.
pub fn parse_private_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| {
            if key.starts_with("0x") {
                key.to_string()
            } else {
                format!("0x{}", key)
            }
        })
        .collect()
}

impl Env {
    /// Builds the environment from an arbitrary key lookup. `load_env` feeds it
    /// the process environment; tests feed it a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Env>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_keys = lookup("PRIVATE_KEY").unwrap_or_default();
        let private_keys = parse_private_keys(&raw_keys);
        if private_keys.is_empty() {
            eprintln!("\n❌ Configuration Error: PRIVATE_KEY is missing or empty\n");
            eprintln!("Set PRIVATE_KEY in .env as a comma-separated list of wallet keys");
            anyhow::bail!("Missing required environment variable: PRIVATE_KEY");
        }

        let min_native_raw = lookup_or(&lookup, "MIN_NATIVE_BALANCE", "0.1");
        let min_native_balance = parse_ether(&min_native_raw)
            .with_context(|| format!("Invalid MIN_NATIVE_BALANCE: {}", min_native_raw))?;

        let gas_price_wei = match lookup("GAS_PRICE_GWEI").map(|v| v.trim().to_string()) {
            Some(raw) if !raw.is_empty() => {
                let wei: U256 = parse_units(&raw, "gwei")
                    .with_context(|| format!("Invalid GAS_PRICE_GWEI: {}", raw))?
                    .get_absolute();
                if wei.is_zero() {
                    anyhow::bail!("Invalid GAS_PRICE_GWEI: must be positive");
                }
                Some(u128::try_from(wei).context("GAS_PRICE_GWEI is out of range")?)
            }
            _ => None,
        };

        let chain_id = lookup_or(&lookup, "CHAIN_ID", &DEFAULT_CHAIN_ID.to_string())
            .parse::<u64>()
            .context("Invalid CHAIN_ID")?;

        let request_timeout_ms = lookup_or(&lookup, "REQUEST_TIMEOUT_MS", "10000")
            .parse::<u64>()
            .context("Invalid REQUEST_TIMEOUT_MS")?;
        if request_timeout_ms < 1000 {
            anyhow::bail!("Invalid REQUEST_TIMEOUT_MS: must be at least 1000ms");
        }

        let check_in_retry_limit = lookup_or(&lookup, "CHECK_IN_RETRY_LIMIT", "3")
            .parse::<u32>()
            .context("Invalid CHECK_IN_RETRY_LIMIT")?;
        if check_in_retry_limit > 10 {
            anyhow::bail!("Invalid CHECK_IN_RETRY_LIMIT: must be between 0 and 10");
        }

        let loop_delay_seconds = lookup_or(&lookup, "LOOP_DELAY_SECONDS", "6")
            .parse::<u64>()
            .context("Invalid LOOP_DELAY_SECONDS")?;

        let confirmation_wait_seconds = lookup_or(&lookup, "CONFIRMATION_WAIT_SECONDS", "6")
            .parse::<u64>()
            .context("Invalid CONFIRMATION_WAIT_SECONDS")?;

        Ok(Env {
            private_keys,
            config_path: PathBuf::from(lookup_or(&lookup, "CONFIG_PATH", "config.json")),
            abi_path: PathBuf::from(lookup_or(&lookup, "ABI_PATH", "abi.json")),
            use_proxy: parse_bool("USE_PROXY", &lookup_or(&lookup, "USE_PROXY", "false"))?,
            proxy_file: PathBuf::from(lookup_or(&lookup, "PROXY_FILE", "proxy.txt")),
            min_native_balance,
            gas_price_wei,
            chain_id,
            request_timeout_ms,
            check_in_retry_limit,
            loop_delay_seconds,
            confirmation_wait_seconds,
            log_to_file: parse_bool("LOG_TO_FILE", &lookup_or(&lookup, "LOG_TO_FILE", "true"))?,
        })
    }
}

pub fn load_env() -> Result<Env> {
    dotenvy::dotenv().ok(); // Load .env file if it exists
    Env::from_lookup(|key| env::var(key).ok())
}
