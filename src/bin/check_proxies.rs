//! Prints the egress IP seen through every proxy in the pool.

use anyhow::{Context, Result};
use checkin_wrap_bot::config::load_env;
use checkin_wrap_bot::interfaces::EgressIp;
use checkin_wrap_bot::utils::{HttpClient, ProxyPool, ReqwestHttpClient};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

const IP_ECHO_URL: &str = "https://api.ipify.org?format=json";

#[tokio::main]
async fn main() -> Result<()> {
    let env = load_env()?;
    let pool = ProxyPool::load(&env.proxy_file)
        .with_context(|| format!("Failed to load proxies from {}", env.proxy_file.display()))?;
    let endpoints = pool.endpoints().to_vec();

    // Pool cursor starts at 0, so request N goes through proxy N.
    let http = ReqwestHttpClient::new(
        Duration::from_millis(env.request_timeout_ms),
        Some(Arc::new(pool)),
    )?;

    println!("\n🌐 Checking {} proxies\n", endpoints.len());
    let mut working = 0usize;
    for endpoint in &endpoints {
        match http.get(IP_ECHO_URL).await {
            Ok(response) if response.status == 200 => {
                let ip = serde_json::from_value::<EgressIp>(response.body)
                    .map(|reply| reply.ip)
                    .unwrap_or_else(|_| "Unknown".to_string());
                working += 1;
                println!("   {} {} -> {}", "✓".green(), endpoint, ip.cyan());
            }
            Ok(response) => println!("   {} {} -> HTTP {}", "✗".red(), endpoint, response.status),
            Err(e) => println!("   {} {} -> {}", "✗".red(), endpoint, e),
        }
    }

    println!("\n{}/{} proxies reachable\n", working, endpoints.len());
    Ok(())
}
