use async_trait::async_trait;
use reclaim_lib::{
    ledger::{BlockReference, ConfirmationOutcome, MockLedgerClient},
    LedgerClient, ReclaimError,
};
use solana_client::rpc_response::RpcKeyedAccount;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::Notify;

use crate::common::TEST_LAST_VALID_BLOCK_HEIGHT;

pub fn block_reference() -> BlockReference {
    BlockReference {
        blockhash: Hash::new_unique(),
        last_valid_block_height: TEST_LAST_VALID_BLOCK_HEIGHT,
    }
}

/// Ledger mock that answers every call and reports `outcome` for any confirmation
pub fn scenario_ledger(
    accounts: Vec<RpcKeyedAccount>,
    rent: u64,
    outcome: ConfirmationOutcome,
) -> MockLedgerClient {
    let mut ledger = MockLedgerClient::new();
    ledger.expect_get_token_accounts_by_owner().returning(move |_, program_id| {
        if *program_id == spl_token_interface::id() {
            Ok(accounts.clone())
        } else {
            Ok(vec![])
        }
    });
    ledger.expect_get_rent_exempt_minimum().returning(move |_| Ok(rent));
    ledger.expect_get_latest_block_reference().returning(|| Ok(block_reference()));
    ledger.expect_confirm_transaction().returning(move |_, _, _| Ok(outcome.clone()));
    ledger
}

/// Ledger whose gated account query blocks until released, for observing in-flight state.
/// Only SPL Token queries are counted; the first one is gated unless `gate_query` says otherwise.
pub struct GatedLedger {
    accounts: Vec<RpcKeyedAccount>,
    rent: u64,
    gated_query: usize,
    queries: AtomicUsize,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl GatedLedger {
    pub fn new(accounts: Vec<RpcKeyedAccount>, rent: u64) -> Self {
        Self {
            accounts,
            rent,
            gated_query: 0,
            queries: AtomicUsize::new(0),
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    /// Gates the `index`-th SPL Token query (zero-based) instead of the first
    pub fn gate_query(mut self, index: usize) -> Self {
        self.gated_query = index;
        self
    }
}

#[async_trait]
impl LedgerClient for GatedLedger {
    async fn get_token_accounts_by_owner(
        &self,
        _owner: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Vec<RpcKeyedAccount>, ReclaimError> {
        if *program_id != spl_token_interface::id() {
            return Ok(vec![]);
        }
        if self.queries.fetch_add(1, Ordering::AcqRel) == self.gated_query {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(self.accounts.clone())
    }

    async fn get_rent_exempt_minimum(&self, _data_len: usize) -> Result<u64, ReclaimError> {
        Ok(self.rent)
    }

    async fn get_latest_block_reference(&self) -> Result<BlockReference, ReclaimError> {
        Ok(block_reference())
    }

    async fn confirm_transaction(
        &self,
        _signature: &Signature,
        _block_reference: &BlockReference,
        _commitment: CommitmentConfig,
    ) -> Result<ConfirmationOutcome, ReclaimError> {
        Ok(ConfirmationOutcome::Confirmed)
    }
}
