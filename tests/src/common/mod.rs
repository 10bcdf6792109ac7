pub mod constants;
pub mod ledger;

pub use accounts::*;
pub use constants::*;
pub use ledger::*;
pub use wallet::*;
