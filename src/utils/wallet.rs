use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use std::str::FromStr;

use crate::error::{BotError, Result};

/// One managed wallet. Read-only after startup.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub index: usize,
    pub address: Address,
    pub signer: PrivateKeySigner,
}

impl Wallet {
    pub fn from_private_key(index: usize, key: &str, chain_id: u64) -> Result<Wallet> {
        let signer = PrivateKeySigner::from_str(key.trim())
            .map_err(|e| BotError::Wallet {
                index,
                reason: e.to_string(),
            })?
            .with_chain_id(Some(chain_id));
        Ok(Wallet {
            index,
            address: signer.address(),
            signer,
        })
    }

    /// Checksummed `0x…` form used in API calls.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }
}

pub fn load_wallets(keys: &[String], chain_id: u64) -> Result<Vec<Wallet>> {
    keys.iter()
        .enumerate()
        .map(|(index, key)| Wallet::from_private_key(index, key, chain_id))
        .collect()
}
