pub mod client;
pub mod rpc_ledger;

pub use client::{BlockReference, ConfirmationOutcome, LedgerClient, MockLedgerClient};
pub use rpc_ledger::RpcLedger;
