pub mod chain_client;
pub mod countdown;
pub mod http;
pub mod logger;
pub mod proxy;
pub mod wallet;

// Re-export commonly used items
pub use chain_client::{ChainClient, RpcChainClient};
pub use countdown::{CountdownPacer, Pacer};
pub use http::{ApiResponse, HttpClient, ReqwestHttpClient};
pub use logger::Logger;
pub use proxy::ProxyPool;
pub use wallet::{load_wallets, Wallet};
