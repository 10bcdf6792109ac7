pub mod account;
pub mod scanner;

pub use account::{mint_label, EmptyAccountRecord, TokenAccountSnapshot, TokenAccountState};
pub use scanner::{scan_empty_accounts, token_programs};
