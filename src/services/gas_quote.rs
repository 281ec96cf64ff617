use alloy::primitives::utils::parse_units;
use serde_json::Value;

use crate::error::{BotError, Result};
use crate::interfaces::{GasOracleReply, GasOracleResult};
use crate::utils::http::HttpClient;
use crate::utils::Logger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasPriceSource {
    /// Configured price in wei.
    Fixed(u128),
    /// Gas tracker URL answering `{status: "1", result: {FastGasPrice}}`.
    Oracle(String),
}

/// Reads `result.FastGasPrice` (gwei) from a gas tracker reply, in wei.
pub fn parse_gas_oracle(body: &Value) -> Result<u128> {
    let reply: GasOracleReply = serde_json::from_value(body.clone())
        .map_err(|e| BotError::GasQuote(format!("malformed gas oracle reply: {}", e)))?;
    if reply.status != "1" {
        return Err(BotError::GasQuote(format!(
            "gas oracle returned status {}",
            reply.status
        )));
    }
    let result: GasOracleResult = reply
        .result
        .ok_or_else(|| BotError::GasQuote("gas oracle reply has no result".into()))
        .and_then(|raw| {
            serde_json::from_value(raw)
                .map_err(|e| BotError::GasQuote(format!("unexpected gas oracle result: {}", e)))
        })?;

    let wei = parse_units(result.fast_gas_price.trim(), "gwei")?.get_absolute();
    u128::try_from(wei).map_err(|_| BotError::GasQuote("gas price out of range".into()))
}

pub async fn quote_gas_price(http: &dyn HttpClient, source: &GasPriceSource) -> Result<u128> {
    match source {
        GasPriceSource::Fixed(wei) => Ok(*wei),
        GasPriceSource::Oracle(url) => {
            let response = http.get(url).await?;
            if response.status != 200 {
                return Err(BotError::Api {
                    status: response.status,
                    body: response.body.to_string(),
                });
            }
            let wei = parse_gas_oracle(&response.body)?;
            Logger::info(&format!("Gas Fee: {} Gwei", format_gwei(wei)));
            Ok(wei)
        }
    }
}

pub fn format_gwei(wei: u128) -> String {
    let whole = wei / 1_000_000_000;
    let frac = wei % 1_000_000_000;
    if frac == 0 {
        whole.to_string()
    } else {
        let frac = format!("{:09}", frac);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}
