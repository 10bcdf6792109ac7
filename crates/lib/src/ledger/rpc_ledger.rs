use async_trait::async_trait;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_request::TokenAccountsFilter,
    rpc_response::RpcKeyedAccount,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::{sync::Arc, time::Duration};

use crate::{
    constant::CONFIRMATION_POLL_INTERVAL_MS,
    error::ReclaimError,
    ledger::client::{BlockReference, ConfirmationOutcome, LedgerClient},
};

/// `LedgerClient` backed by a JSON-RPC endpoint
pub struct RpcLedger {
    rpc_client: Arc<RpcClient>,
    poll_interval: Duration,
}

impl RpcLedger {
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client, poll_interval: Duration::from_millis(CONFIRMATION_POLL_INTERVAL_MS) }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[async_trait]
impl LedgerClient for RpcLedger {
    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Vec<RpcKeyedAccount>, ReclaimError> {
        Ok(self
            .rpc_client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(*program_id))
            .await?)
    }

    async fn get_rent_exempt_minimum(&self, data_len: usize) -> Result<u64, ReclaimError> {
        Ok(self.rpc_client.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn get_latest_block_reference(&self) -> Result<BlockReference, ReclaimError> {
        let (blockhash, last_valid_block_height) = self
            .rpc_client
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
            .await?;

        Ok(BlockReference { blockhash, last_valid_block_height })
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        block_reference: &BlockReference,
        commitment: CommitmentConfig,
    ) -> Result<ConfirmationOutcome, ReclaimError> {
        loop {
            let statuses = self.rpc_client.get_signature_statuses(&[*signature]).await?.value;

            match statuses.into_iter().next().flatten() {
                Some(status) => {
                    if status.satisfies_commitment(commitment) {
                        return Ok(match status.err {
                            Some(err) => ConfirmationOutcome::Failed(err),
                            None => ConfirmationOutcome::Confirmed,
                        });
                    }
                }
                None => {
                    let block_height =
                        self.rpc_client.get_block_height_with_commitment(commitment).await?;
                    if block_height > block_reference.last_valid_block_height {
                        log::warn!(
                            "Signature {signature} not found before block height {} (current {block_height})",
                            block_reference.last_valid_block_height
                        );
                        return Ok(ConfirmationOutcome::Expired);
                    }
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
