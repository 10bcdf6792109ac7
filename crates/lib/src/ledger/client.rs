use async_trait::async_trait;
use mockall::automock;
use solana_client::rpc_response::RpcKeyedAccount;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::TransactionError,
};

use crate::error::ReclaimError;

/// Recent blockhash plus the last block height at which it is still accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockReference {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Final state of a broadcast transaction as seen at the requested commitment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    /// Landed on chain but execution failed
    Failed(TransactionError),
    /// The block reference went stale before the signature was observed
    Expired,
}

/// Read access to the ledger needed by the scanner and the submitter
#[automock]
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Vec<RpcKeyedAccount>, ReclaimError>;

    async fn get_rent_exempt_minimum(&self, data_len: usize) -> Result<u64, ReclaimError>;

    async fn get_latest_block_reference(&self) -> Result<BlockReference, ReclaimError>;

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        block_reference: &BlockReference,
        commitment: CommitmentConfig,
    ) -> Result<ConfirmationOutcome, ReclaimError>;
}
