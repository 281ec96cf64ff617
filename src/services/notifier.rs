use alloy::primitives::{Address, TxHash};

use crate::interfaces::{NotificationReply, TransactionNotification};
use crate::utils::http::HttpClient;
use crate::utils::Logger;

/// Nominal amount reported for every wrap (0.0001 in wei).
pub const NOTIFIED_AMOUNT: &str = "100000000000000";
pub const WRAP_TX_TYPE: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum NotifyOutcome {
    Awarded { points: Option<f64> },
    Rejected { status: u16, body: String },
    Failed { error: String },
}

pub fn build_notification(
    chain_id: u64,
    wallet: Address,
    tx_hash: TxHash,
    from_token: Address,
    to_token: Address,
    gas_fee_wei: u128,
) -> TransactionNotification {
    TransactionNotification {
        blockchain_id: chain_id,
        kind: WRAP_TX_TYPE,
        wallet_address: wallet.to_checksum(None),
        hash: format!("{:#x}", tx_hash),
        from_token_address: from_token.to_checksum(None),
        to_token_address: to_token.to_checksum(None),
        from_token_symbol: "WPOL".to_string(),
        to_token_symbol: "tPOL".to_string(),
        from_amount: NOTIFIED_AMOUNT.to_string(),
        to_amount: NOTIFIED_AMOUNT.to_string(),
        gas_fee_token_address: Address::ZERO.to_checksum(None),
        gas_fee_token_symbol: "POL".to_string(),
        gas_fee_amount: gas_fee_wei.to_string(),
    }
}

/// Reports a wrap to the points API. 201 means points were awarded.
pub async fn notify_transaction(
    http: &dyn HttpClient,
    url: &str,
    notification: &TransactionNotification,
) -> NotifyOutcome {
    let payload = match serde_json::to_value(notification) {
        Ok(payload) => payload,
        Err(e) => {
            Logger::error(&format!("Failed to encode notification: {}", e));
            return NotifyOutcome::Failed {
                error: e.to_string(),
            };
        }
    };

    match http.post(url, &payload).await {
        Ok(response) if response.status == 201 => {
            let points = serde_json::from_value::<NotificationReply>(response.body)
                .ok()
                .and_then(|reply| reply.points_amount);
            match points {
                Some(points) => Logger::success(&format!("Earn Cubes: {}", points)),
                None => Logger::success("Transaction reported"),
            }
            NotifyOutcome::Awarded { points }
        }
        Ok(response) => {
            let body = response.body.to_string();
            Logger::error(&format!(
                "API notification failed (HTTP {}): {}",
                response.status, body
            ));
            NotifyOutcome::Rejected {
                status: response.status,
                body,
            }
        }
        Err(e) => {
            Logger::error(&format!("Failed to notify API: {}", e));
            NotifyOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
