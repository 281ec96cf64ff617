pub mod bot;
pub mod check_in;
pub mod gas_quote;
pub mod notifier;
pub mod rotation;
pub mod settings;
pub mod wrap;

pub use bot::*;
pub use check_in::*;
pub use gas_quote::*;
pub use notifier::*;
pub use rotation::*;
pub use settings::*;
pub use wrap::*;
