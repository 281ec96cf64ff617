//! Common test utilities and helpers
#![allow(dead_code)]

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;
use checkin_wrap_bot::error::{BotError, Result};
use checkin_wrap_bot::services::{
    Endpoints, GasPriceSource, CHECK_IN_RETRY_DELAY, WRAP_AMOUNT_WEI,
};
use checkin_wrap_bot::utils::{ApiResponse, ChainClient, HttpClient, Pacer, Wallet};
use checkin_wrap_bot::CycleSettings;
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const STATUS_URL: &str = "https://api.test/wallet/check-in/current";
pub const CHECK_IN_URL: &str = "https://api.test/wallet/check-in";
pub const TRANSACTION_URL: &str = "https://api.test/transaction";
pub const GAS_ORACLE_URL: &str = "https://gas.test/api?module=gastracker&action=gasoracle";

pub const WRAP_CONTRACT: Address = address!("1cd0cd01c8c902adab3430ae04b9ea32cb309cf1");
pub const WRAPPED_TOKEN: Address = address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");
pub const TX_HASH: TxHash = TxHash::repeat_byte(0xab);

/// Anvil's first development key.
pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const SECOND_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const FIXED_GAS_PRICE: u128 = 30_000_000_000;

pub fn test_wallet(index: usize) -> Wallet {
    let key = if index % 2 == 0 { TEST_KEY } else { SECOND_KEY };
    Wallet::from_private_key(index, key, 137).expect("test key is valid")
}

pub fn test_settings() -> CycleSettings {
    CycleSettings {
        endpoints: Endpoints {
            check_in_status_url: STATUS_URL.to_string(),
            check_in_url: CHECK_IN_URL.to_string(),
            transaction_url: TRANSACTION_URL.to_string(),
        },
        gas_price: GasPriceSource::Fixed(FIXED_GAS_PRICE),
        chain_id: 137,
        wrap_contract: WRAP_CONTRACT,
        wrapped_token: WRAPPED_TOKEN,
        wrap_amount: U256::from(WRAP_AMOUNT_WEI),
        min_token_balance: U256::from(WRAP_AMOUNT_WEI),
        min_native_balance: parse_ether("0.1").unwrap(),
        check_in_retries: 3,
        retry_delay: CHECK_IN_RETRY_DELAY,
        confirmation_wait_secs: 6,
        loop_delay_secs: 6,
    }
}

/// Canned reply for a scripted route.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(ApiResponse),
    Unreachable(String),
}

pub fn reply(status: u16, body: Value) -> Scripted {
    Scripted::Reply(ApiResponse::new(status, body))
}

pub fn unreachable(reason: &str) -> Scripted {
    Scripted::Unreachable(reason.to_string())
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

struct Route {
    method: Method,
    prefix: String,
    replies: VecDeque<Scripted>,
    last: Option<Scripted>,
}

/// HTTP fake answering by method and longest matching URL prefix. Each route
/// replays its queue in order and then repeats the final reply.
#[derive(Default)]
pub struct ScriptedHttp {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, prefix: &str, replies: Vec<Scripted>) -> Self {
        self.routes.lock().unwrap().push(Route {
            method,
            prefix: prefix.to_string(),
            replies: replies.into(),
            last: None,
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, prefix: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .filter(|call| self.best_prefix(&call.method, &call.url).as_deref() == Some(prefix))
            .collect()
    }

    fn best_prefix(&self, method: &Method, url: &str) -> Option<String> {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .filter(|route| &route.method == method && url.starts_with(&route.prefix))
            .max_by_key(|route| route.prefix.len())
            .map(|route| route.prefix.clone())
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            url: url.to_string(),
            body: body.cloned(),
        });

        let mut routes = self.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .filter(|route| route.method == method && url.starts_with(&route.prefix))
            .max_by_key(|route| route.prefix.len())
            .ok_or_else(|| BotError::Transport(format!("no scripted route for {} {}", method, url)))?;

        let next = match route.replies.pop_front() {
            Some(next) => {
                route.last = Some(next.clone());
                next
            }
            None => route
                .last
                .clone()
                .ok_or_else(|| BotError::Transport(format!("route {} has no replies", url)))?,
        };

        match next {
            Scripted::Reply(response) => Ok(response),
            Scripted::Unreachable(reason) => Err(BotError::Transport(reason)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentCall {
    pub from: Address,
    pub method: String,
    pub args: Vec<DynSolValue>,
    pub gas_price: u128,
}

/// Chain fake with fixed balances shared by every wallet.
pub struct FakeChain {
    pub token_balance: U256,
    pub native_balance: U256,
    pub balance_error: Option<String>,
    pub submit_error: Option<String>,
    pub balance_reads: AtomicUsize,
    sent: Mutex<Vec<SentCall>>,
}

impl FakeChain {
    pub fn funded() -> Self {
        Self::with_balances(parse_ether("1").unwrap(), parse_ether("5").unwrap())
    }

    pub fn with_balances(token: U256, native: U256) -> Self {
        Self {
            token_balance: token,
            native_balance: native,
            balance_error: None,
            submit_error: None,
            balance_reads: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SentCall> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn native_balance(&self, _owner: Address) -> Result<U256> {
        self.balance_reads.fetch_add(1, Ordering::SeqCst);
        match &self.balance_error {
            Some(error) => Err(BotError::Rpc(error.clone())),
            None => Ok(self.native_balance),
        }
    }

    async fn token_balance(&self, _token: Address, _owner: Address) -> Result<U256> {
        self.balance_reads.fetch_add(1, Ordering::SeqCst);
        match &self.balance_error {
            Some(error) => Err(BotError::Rpc(error.clone())),
            None => Ok(self.token_balance),
        }
    }

    async fn send_contract_call(
        &self,
        wallet: &Wallet,
        method: &str,
        args: &[DynSolValue],
        gas_price: u128,
    ) -> Result<TxHash> {
        if let Some(error) = &self.submit_error {
            return Err(BotError::Rpc(error.clone()));
        }
        self.sent.lock().unwrap().push(SentCall {
            from: wallet.address,
            method: method.to_string(),
            args: args.to_vec(),
            gas_price,
        });
        Ok(TX_HASH)
    }

    async fn block_number(&self) -> Result<u64> {
        Ok(1)
    }
}

/// Records every wait instead of sleeping.
#[derive(Default)]
pub struct RecordingPacer {
    sleeps: Mutex<Vec<Duration>>,
    countdowns: Mutex<Vec<(String, u64)>>,
}

impl RecordingPacer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn countdowns(&self) -> Vec<(String, u64)> {
        self.countdowns.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }

    async fn countdown(&self, label: &str, seconds: u64) {
        self.countdowns
            .lock()
            .unwrap()
            .push((label.to_string(), seconds));
    }
}

/// Sample `config.json` matching the shipped layout.
pub fn sample_config_json() -> String {
    format!(
        r#"{{
  "RPC_URL": "https://polygon-rpc.com",
  "TPOL_ADDRESS": "{}",
  "WMATIC_ADDRESS": "{}",
  "APi_TOTAL_POINT": "https://api.test/points",
  "API_URL_CHECK_IN": "{}",
  "API_URL_CURRENT": "{}",
  "API_URLS": {{ "TRANSACTION": "{}" }}
}}"#,
        WRAP_CONTRACT, WRAPPED_TOKEN, CHECK_IN_URL, STATUS_URL, TRANSACTION_URL
    )
}

pub const WRAP_ABI_JSON: &str = r#"[
  {
    "type": "function",
    "name": "wrap",
    "stateMutability": "nonpayable",
    "inputs": [
      { "name": "amount", "type": "uint256", "internalType": "uint256" },
      { "name": "receiver", "type": "address", "internalType": "address" }
    ],
    "outputs": []
  },
  {
    "type": "function",
    "name": "unwrap",
    "stateMutability": "nonpayable",
    "inputs": [
      { "name": "amount", "type": "uint256", "internalType": "uint256" },
      { "name": "receiver", "type": "address", "internalType": "address" }
    ],
    "outputs": []
  }
]"#;
