use serde::{Deserialize, Serialize};

/// Body of `POST API_URLS.TRANSACTION` announcing a wrap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionNotification {
    pub blockchain_id: u64,
    #[serde(rename = "type")]
    pub kind: u8,
    pub wallet_address: String,
    pub hash: String,
    pub from_token_address: String,
    pub to_token_address: String,
    pub from_token_symbol: String,
    pub to_token_symbol: String,
    pub from_amount: String,
    pub to_amount: String,
    pub gas_fee_token_address: String,
    pub gas_fee_token_symbol: String,
    pub gas_fee_amount: String,
}

/// Reply to a transaction notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReply {
    pub points_amount: Option<f64>,
}

/// PolygonScan-style gas tracker reply. `result` is an object on success and
/// an error string otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct GasOracleReply {
    pub status: String,
    pub result: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasOracleResult {
    pub fast_gas_price: String,
}

/// Reply of the egress-IP probe used by `check_proxies`.
#[derive(Debug, Clone, Deserialize)]
pub struct EgressIp {
    pub ip: String,
}
