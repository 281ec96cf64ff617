use anyhow::{Context, Result};
use checkin_wrap_bot::config::{load_env, AppConfig, WrapAbi};
use checkin_wrap_bot::services::{CheckInBot, CycleSettings, RotationState};
use checkin_wrap_bot::utils::{
    load_wallets, CountdownPacer, Logger, ProxyPool, ReqwestHttpClient, RpcChainClient,
};
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Load environment variables
    let env = load_env()?;
    Logger::set_file_logging(env.log_to_file);

    let config = AppConfig::load(&env.config_path)?;
    let wrap_abi = WrapAbi::load(&env.abi_path)
        .with_context(|| format!("Failed to load ABI from {}", env.abi_path.display()))?;
    let wallets = load_wallets(&env.private_keys, env.chain_id)?;

    let proxy_pool = if env.use_proxy {
        let pool = ProxyPool::load(&env.proxy_file)
            .with_context(|| format!("Failed to load proxies from {}", env.proxy_file.display()))?;
        Some(Arc::new(pool))
    } else {
        None
    };

    let addresses: Vec<String> = wallets.iter().map(|w| w.address_string()).collect();
    Logger::startup(&addresses, proxy_pool.as_ref().map(|pool| pool.len()));

    let http = ReqwestHttpClient::new(Duration::from_millis(env.request_timeout_ms), proxy_pool)?;
    let chain = RpcChainClient::new(
        &config.rpc_url,
        env.chain_id,
        config.wrap_contract,
        wrap_abi.abi().clone(),
    )?;
    Logger::info(&format!(
        "Wrap contract {} ({})",
        config.wrap_contract,
        wrap_abi.signature()
    ));

    let settings = CycleSettings::from_config(&env, &config);
    let bot = CheckInBot::new(
        wallets,
        Arc::new(http),
        Arc::new(chain),
        Arc::new(CountdownPacer),
        settings,
    )?;

    Logger::separator();
    Logger::info(&format!(
        "Starting rotation over {} wallet(s)",
        bot.wallets().len()
    ));

    let mut state = RotationState::new();
    let shutdown = tokio::select! {
        _ = bot.run_forever(&mut state) => None,
        result = signal::ctrl_c() => Some(result),
    };

    if let Some(result) = shutdown {
        Logger::clear_line();
        Logger::separator();
        match result {
            Ok(()) => Logger::info(&format!(
                "Received SIGINT after {} iteration(s), exiting",
                state.iterations()
            )),
            Err(err) => eprintln!("{} {}", "Unable to listen for shutdown signal:".red(), err),
        }
    }

    Ok(())
}
