use alloy::primitives::utils::format_ether;
use alloy::primitives::{TxHash, U256};

use crate::config::wrap_args;
use crate::error::Result;
use crate::services::gas_quote::quote_gas_price;
use crate::services::settings::CycleSettings;
use crate::utils::http::HttpClient;
use crate::utils::{ChainClient, Logger, Pacer, Wallet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balances {
    pub token: U256,
    pub native: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    InsufficientToken,
    InsufficientNative,
}

/// Both balances must reach their minimum; the token check wins when both fail.
pub fn evaluate_gate(balances: Balances, min_token: U256, min_native: U256) -> GateDecision {
    if balances.token < min_token {
        GateDecision::InsufficientToken
    } else if balances.native < min_native {
        GateDecision::InsufficientNative
    } else {
        GateDecision::Pass
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStage {
    Balances,
    GasQuote,
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WrapOutcome {
    Submitted { tx_hash: TxHash, gas_price: u128 },
    Skipped { balances: Balances, reason: GateDecision },
    Failed { stage: WrapStage, error: String },
}

async fn read_balances(
    chain: &dyn ChainClient,
    settings: &CycleSettings,
    wallet: &Wallet,
) -> Result<Balances> {
    let token = chain
        .token_balance(settings.wrapped_token, wallet.address)
        .await?;
    Logger::balance("WPOL", &format_ether(token));
    let native = chain.native_balance(wallet.address).await?;
    Logger::balance("POL", &format_ether(native));
    Ok(Balances { token, native })
}

fn failed(stage: WrapStage, error: impl std::fmt::Display) -> WrapOutcome {
    Logger::error(&format!("Wrap process failed ({:?}): {}", stage, error));
    WrapOutcome::Failed {
        stage,
        error: error.to_string(),
    }
}

/// Balance gate, gas quote, `wrap(amount, self)` submission, then a blind
/// confirmation countdown. Inclusion on chain is never checked.
pub async fn execute_wrap(
    chain: &dyn ChainClient,
    http: &dyn HttpClient,
    pacer: &dyn Pacer,
    settings: &CycleSettings,
    wallet: &Wallet,
) -> WrapOutcome {
    let balances = match read_balances(chain, settings, wallet).await {
        Ok(balances) => balances,
        Err(e) => return failed(WrapStage::Balances, e),
    };

    let decision = evaluate_gate(
        balances,
        settings.min_token_balance,
        settings.min_native_balance,
    );
    if decision != GateDecision::Pass {
        Logger::warning(&format!(
            "Insufficient WPOL or POL balance (need {} WPOL and {} POL), skipping wrap",
            format_ether(settings.min_token_balance),
            format_ether(settings.min_native_balance)
        ));
        return WrapOutcome::Skipped {
            balances,
            reason: decision,
        };
    }

    let gas_price = match quote_gas_price(http, &settings.gas_price).await {
        Ok(gas_price) => gas_price,
        Err(e) => return failed(WrapStage::GasQuote, e),
    };

    let args = wrap_args(settings.wrap_amount, wallet.address);
    let tx_hash = match chain
        .send_contract_call(wallet, "wrap", &args, gas_price)
        .await
    {
        Ok(tx_hash) => tx_hash,
        Err(e) => return failed(WrapStage::Submit, e),
    };
    Logger::transaction("WPOL to tPOL txid", &format!("{:#x}", tx_hash));

    pacer
        .countdown("Waiting Confirmation", settings.confirmation_wait_secs)
        .await;
    Logger::success("Wrap success!");

    WrapOutcome::Submitted { tx_hash, gas_price }
}
