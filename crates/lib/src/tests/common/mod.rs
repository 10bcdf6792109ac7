//! Centralized re-exports of the mock utilities used across unit tests
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

use crate::tests::{account_mock, rpc_mock};

pub use account_mock::*;
pub use rpc_mock::*;

/// Fresh owner keypair together with its public key
pub fn test_owner() -> (Keypair, Pubkey) {
    let keypair = Keypair::new();
    let pubkey = keypair.pubkey();
    (keypair, pubkey)
}
