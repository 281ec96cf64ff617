pub mod app_config;
pub mod contract_abi;
pub mod env;

pub use app_config::*;
pub use contract_abi::*;
pub use env::*;
