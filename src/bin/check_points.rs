//! Shows the points total reported by the API for every configured wallet.

use anyhow::{Context, Result};
use checkin_wrap_bot::config::{load_env, AppConfig};
use checkin_wrap_bot::utils::http::with_query;
use checkin_wrap_bot::utils::{load_wallets, HttpClient, Logger, ReqwestHttpClient};
use colored::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let env = load_env()?;
    let config = AppConfig::load(&env.config_path)?;
    let points_url = config
        .total_point_url
        .clone()
        .context("APi_TOTAL_POINT is not set in config")?;
    let wallets = load_wallets(&env.private_keys, env.chain_id)?;
    let http = ReqwestHttpClient::new(Duration::from_millis(env.request_timeout_ms), None)?;

    Logger::header("🏆 POINTS");
    for wallet in &wallets {
        let address = wallet.address_string();
        let url = with_query(&points_url, "address", &address);
        match http.get(&url).await {
            Ok(response) if response.status == 200 => {
                println!(
                    "   {}. {} {}",
                    wallet.index + 1,
                    Logger::format_address(&address),
                    serde_json::to_string_pretty(&response.body)?.cyan()
                );
            }
            Ok(response) => println!(
                "   {}. {} {}",
                wallet.index + 1,
                Logger::format_address(&address),
                format!("HTTP {}", response.status).red()
            ),
            Err(e) => println!(
                "   {}. {} {}",
                wallet.index + 1,
                Logger::format_address(&address),
                e.to_string().red()
            ),
        }
    }
    Ok(())
}
