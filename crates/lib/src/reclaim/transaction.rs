use solana_program_pack::Pack;
use solana_sdk::{message::Message, transaction::Transaction};

use crate::{
    constant::MAX_TRANSACTION_SIZE,
    error::ReclaimError,
    ledger::{BlockReference, LedgerClient},
    reclaim::{
        fee::FeeBreakdown,
        instruction::{build_reclaim_instructions, ReclaimRequest},
    },
};

/// A built, unsigned reclaim transaction and the amounts it moves
#[derive(Debug, Clone)]
pub struct ReclaimPlan {
    pub transaction: Transaction,
    pub breakdown: FeeBreakdown,
    pub block_reference: BlockReference,
    /// Serialized length including signature placeholders
    pub size: usize,
}

impl ReclaimPlan {
    pub fn instruction_count(&self) -> usize {
        self.transaction.message.instructions.len()
    }
}

/// Builds the batched close transaction without signing or sending it.
///
/// Local validation happens before any ledger call. Ledger failures here surface as
/// `SubmitError` since nothing has been broadcast yet.
pub async fn plan_reclaim(
    ledger: &dyn LedgerClient,
    request: &ReclaimRequest,
) -> Result<ReclaimPlan, ReclaimError> {
    request.validate()?;

    let block_reference = ledger.get_latest_block_reference().await.map_err(|e| {
        ReclaimError::SubmitError(format!("Failed to fetch latest blockhash: {e}"))
    })?;

    let deposits = resolve_deposits(ledger, request).await?;
    let breakdown = request.fee_split.breakdown(deposits.iter().copied());
    let instructions = build_reclaim_instructions(request, &deposits)?;

    let message =
        Message::new_with_blockhash(&instructions, Some(&request.owner), &block_reference.blockhash);
    let transaction = Transaction::new_unsigned(message);

    let size = bincode::serialize(&transaction)?.len();
    if size > MAX_TRANSACTION_SIZE {
        return Err(ReclaimError::BuildError(format!(
            "Closing {} accounts needs {size} bytes, over the {MAX_TRANSACTION_SIZE} byte transaction limit; select fewer accounts",
            request.targets.len()
        )));
    }

    log::debug!(
        "Planned reclaim of {} accounts: {} instructions, {size} bytes",
        request.targets.len(),
        transaction.message.instructions.len()
    );

    Ok(ReclaimPlan { transaction, breakdown, block_reference, size })
}

/// Deposit of each target, fetching the standard account rent once if any target lacks one
async fn resolve_deposits(
    ledger: &dyn LedgerClient,
    request: &ReclaimRequest,
) -> Result<Vec<u64>, ReclaimError> {
    let fallback = if request.targets.iter().any(|target| target.deposit_lamports.is_none()) {
        let data_len = spl_token_interface::state::Account::LEN;
        let rent = ledger.get_rent_exempt_minimum(data_len).await.map_err(|e| {
            ReclaimError::SubmitError(format!("Failed to fetch rent-exempt minimum: {e}"))
        })?;
        Some(rent)
    } else {
        None
    };

    Ok(request
        .targets
        .iter()
        .map(|target| target.deposit_lamports.or(fallback).unwrap_or_default())
        .collect())
}
