//! Standalone readiness check: RPC, wallet balances against the wrap gate,
//! and the check-in status API.

use alloy::primitives::utils::format_ether;
use anyhow::Result;
use checkin_wrap_bot::config::{load_env, AppConfig, WrapAbi};
use checkin_wrap_bot::services::{evaluate_gate, Balances, CycleSettings, GateDecision};
use checkin_wrap_bot::utils::http::with_query;
use checkin_wrap_bot::utils::{
    load_wallets, ChainClient, HttpClient, Logger, ProxyPool, ReqwestHttpClient, RpcChainClient,
};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

fn print_header() {
    println!("\n{}", "━".repeat(60).cyan().bold());
    println!("{}", "     🏥 CHECK-IN BOT - HEALTH CHECK".cyan().bold());
    println!("{}\n", "━".repeat(60).cyan().bold());
}

fn status_icon(ok: bool) -> ColoredString {
    if ok {
        "✅".normal()
    } else {
        "❌".normal()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    print_header();

    let env = load_env()?;
    let config = AppConfig::load(&env.config_path)?;
    let wrap_abi = WrapAbi::load(&env.abi_path)?;
    let wallets = load_wallets(&env.private_keys, env.chain_id)?;
    let settings = CycleSettings::from_config(&env, &config);

    let proxy_pool = if env.use_proxy {
        Some(Arc::new(ProxyPool::load(&env.proxy_file)?))
    } else {
        None
    };
    let http = ReqwestHttpClient::new(Duration::from_millis(env.request_timeout_ms), proxy_pool)?;
    let chain = RpcChainClient::new(
        &config.rpc_url,
        env.chain_id,
        config.wrap_contract,
        wrap_abi.abi().clone(),
    )?;

    let mut issues = 0usize;

    println!("{}", "📊 Configuration Summary:".cyan());
    println!("   Wallets:        {}", wallets.len());
    println!("   Wrap contract:  {} ({})", config.wrap_contract, wrap_abi.signature());
    println!("   Wrapped token:  {}", config.wrapped_token);
    println!("   Min POL:        {}", format_ether(settings.min_native_balance));
    match http.proxy_pool() {
        Some(pool) => println!("   Proxies:        {}", pool.len()),
        None => println!("   Proxies:        disabled"),
    }
    println!();

    match chain.block_number().await {
        Ok(block) => println!("{} RPC: latest block {}", status_icon(true), block),
        Err(e) => {
            issues += 1;
            println!("{} RPC: {}", status_icon(false), e);
        }
    }

    for wallet in &wallets {
        let address = wallet.address_string();
        let token = chain.token_balance(config.wrapped_token, wallet.address).await;
        let native = chain.native_balance(wallet.address).await;
        match (token, native) {
            (Ok(token), Ok(native)) => {
                let decision = evaluate_gate(
                    Balances { token, native },
                    settings.min_token_balance,
                    settings.min_native_balance,
                );
                let ok = decision == GateDecision::Pass;
                if !ok {
                    issues += 1;
                }
                println!(
                    "{} Wallet {} {}: WPOL {} | POL {}{}",
                    status_icon(ok),
                    wallet.index + 1,
                    Logger::format_address(&address),
                    format_ether(token),
                    format_ether(native),
                    match decision {
                        GateDecision::Pass => String::new(),
                        other => format!(" ({:?})", other),
                    }
                );
            }
            (token, native) => {
                issues += 1;
                let error = token.err().or(native.err()).map(|e| e.to_string()).unwrap_or_default();
                println!(
                    "{} Wallet {} {}: {}",
                    status_icon(false),
                    wallet.index + 1,
                    Logger::format_address(&address),
                    error
                );
            }
        }
    }

    if let Some(first) = wallets.first() {
        let url = with_query(&config.check_in_status_url, "address", &first.address_string());
        match http.get(&url).await {
            Ok(response) if response.status == 200 => {
                println!("{} Check-in status API responding", status_icon(true))
            }
            Ok(response) => {
                issues += 1;
                println!("{} Check-in status API: HTTP {}", status_icon(false), response.status);
            }
            Err(e) => {
                issues += 1;
                println!("{} Check-in status API: {}", status_icon(false), e);
            }
        }
    }

    println!();
    if issues == 0 {
        println!("{}\n", "🎉 All Systems Operational!".green().bold());
        println!("   {}\n", "cargo run --release".green());
    } else {
        println!("{}\n", format!("⚠️  {} Issue(s) Found", issues).red().bold());
        println!("{}\n", "Wallets failing the balance gate will be skipped every cycle.".yellow());
    }
    Ok(())
}
