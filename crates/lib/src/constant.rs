pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// Legacy transactions must fit in a single network packet
pub const MAX_TRANSACTION_SIZE: usize = 1232;

// Number of leading mint characters shown as the token label
pub const MINT_LABEL_LEN: usize = 4;

// Donation
pub const DEFAULT_DONATION_PERCENTAGE: u8 = 5;
pub const MAX_DONATION_PERCENTAGE: u8 = 100;

// Confirmation
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 500;

// RPC
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 90;
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";
pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:8899";

// Explorer
pub const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

pub const DEFAULT_CONFIG_PATH: &str = "reclaim.toml";
