use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use async_trait::async_trait;

use crate::config::encode_method;
use crate::error::{BotError, Result};
use crate::utils::wallet::Wallet;

sol! {
    #[sol(rpc)]
    contract Erc20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// On-chain capability used by the wrap step.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn native_balance(&self, owner: Address) -> Result<U256>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256>;

    /// Signs with `wallet` and broadcasts a call to the configured contract.
    /// Returns as soon as the node accepts the transaction.
    async fn send_contract_call(
        &self,
        wallet: &Wallet,
        method: &str,
        args: &[DynSolValue],
        gas_price: u128,
    ) -> Result<TxHash>;

    async fn block_number(&self) -> Result<u64>;
}

/// JSON-RPC backed client for one contract.
pub struct RpcChainClient {
    rpc_url: url::Url,
    chain_id: u64,
    contract: Address,
    abi: JsonAbi,
    reader: DynProvider,
}

fn rpc_error(context: &str, err: impl std::fmt::Display) -> BotError {
    BotError::Rpc(format!("{}: {}", context, err))
}

impl RpcChainClient {
    pub fn new(rpc_url: &str, chain_id: u64, contract: Address, abi: JsonAbi) -> Result<Self> {
        let rpc_url: url::Url = rpc_url
            .parse()
            .map_err(|e| BotError::Config(format!("Invalid RPC_URL {}: {}", rpc_url, e)))?;
        let reader = ProviderBuilder::new()
            .connect_http(rpc_url.clone())
            .erased();
        Ok(Self {
            rpc_url,
            chain_id,
            contract,
            abi,
            reader,
        })
    }

    pub fn contract(&self) -> Address {
        self.contract
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn native_balance(&self, owner: Address) -> Result<U256> {
        tracing::debug!(%owner, "eth_getBalance");
        self.reader
            .get_balance(owner)
            .await
            .map_err(|e| rpc_error("native balance", e))
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        tracing::debug!(%token, %owner, "balanceOf");
        Erc20::new(token, self.reader.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| rpc_error("token balance", e))
    }

    async fn send_contract_call(
        &self,
        wallet: &Wallet,
        method: &str,
        args: &[DynSolValue],
        gas_price: u128,
    ) -> Result<TxHash> {
        let calldata = encode_method(&self.abi, method, args)?;
        let tx = TransactionRequest::default()
            .with_from(wallet.address)
            .with_to(self.contract)
            .with_input(calldata)
            .with_gas_price(gas_price);

        let provider = ProviderBuilder::new()
            .wallet(wallet.signer.clone())
            .with_chain_id(self.chain_id)
            .connect_http(self.rpc_url.clone());

        tracing::debug!(from = %wallet.address, to = %self.contract, method, gas_price, "sending transaction");
        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| rpc_error(method, e))?;
        Ok(*pending.tx_hash())
    }

    async fn block_number(&self) -> Result<u64> {
        self.reader
            .get_block_number()
            .await
            .map_err(|e| rpc_error("block number", e))
    }
}
