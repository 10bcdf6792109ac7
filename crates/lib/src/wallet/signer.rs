use async_trait::async_trait;
use mockall::automock;
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::error::ReclaimError;

/// External wallet capability: signs a transaction and broadcasts it
#[automock]
#[async_trait]
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Signs the unsigned `transaction` and submits it, returning its signature once the
    /// ledger has accepted it for processing
    async fn sign_and_send(&self, transaction: Transaction) -> Result<Signature, ReclaimError>;
}
