use alloy::primitives::{Address, U256};
use std::time::Duration;

use crate::config::{AppConfig, Env};
use crate::services::gas_quote::GasPriceSource;

/// 0.0001 units of an 18-decimal token, in wei.
pub const WRAP_AMOUNT_WEI: u64 = 100_000_000_000_000;
pub const CHECK_IN_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub check_in_status_url: String,
    pub check_in_url: String,
    pub transaction_url: String,
}

/// Everything one wallet cycle needs besides the capabilities.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub endpoints: Endpoints,
    pub gas_price: GasPriceSource,
    pub chain_id: u64,
    pub wrap_contract: Address,
    pub wrapped_token: Address,
    pub wrap_amount: U256,
    pub min_token_balance: U256,
    pub min_native_balance: U256,
    pub check_in_retries: u32,
    pub retry_delay: Duration,
    pub confirmation_wait_secs: u64,
    pub loop_delay_secs: u64,
}

impl CycleSettings {
    pub fn from_config(env: &Env, config: &AppConfig) -> Self {
        let gas_price = match env.gas_price_wei {
            Some(wei) => GasPriceSource::Fixed(wei),
            None => GasPriceSource::Oracle(config.gas_quote_url.clone()),
        };
        Self {
            endpoints: Endpoints {
                check_in_status_url: config.check_in_status_url.clone(),
                check_in_url: config.check_in_url.clone(),
                transaction_url: config.transaction_url.clone(),
            },
            gas_price,
            chain_id: env.chain_id,
            wrap_contract: config.wrap_contract,
            wrapped_token: config.wrapped_token,
            wrap_amount: U256::from(WRAP_AMOUNT_WEI),
            min_token_balance: U256::from(WRAP_AMOUNT_WEI),
            min_native_balance: env.min_native_balance,
            check_in_retries: env.check_in_retry_limit,
            retry_delay: CHECK_IN_RETRY_DELAY,
            confirmation_wait_secs: env.confirmation_wait_seconds,
            loop_delay_secs: env.loop_delay_seconds,
        }
    }
}
