pub mod config;
pub mod constant;
pub mod error;
pub mod ledger;
pub mod network;
pub mod reclaim;
pub mod rpc;
pub mod sanitize;
pub mod scan;
pub mod session;
pub mod wallet;
pub use config::Config;
pub use error::ReclaimError;
pub use ledger::{LedgerClient, RpcLedger};
pub use network::Network;
pub use reclaim::{FeeBreakdown, FeeSplit, ReclaimReceipt};
pub use scan::EmptyAccountRecord;
pub use session::{OperationState, ReclaimSession};
pub use wallet::{KeychainWallet, WalletSigner};
