use solana_commitment_config::CommitmentConfig;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    error::ReclaimError,
    ledger::{ConfirmationOutcome, LedgerClient},
    reclaim::{fee::FeeBreakdown, instruction::ReclaimRequest, transaction::plan_reclaim},
    wallet::WalletSigner,
};

/// Result of a confirmed reclaim
#[derive(Debug, Clone, PartialEq)]
pub struct ReclaimReceipt {
    pub signature: Signature,
    pub breakdown: FeeBreakdown,
    pub closed: Vec<Pubkey>,
}

/// Closes the requested accounts in one transaction and waits for it to be confirmed.
///
/// The signature is returned only after confirmation. Once the transaction has been
/// broadcast every failure is a `ConfirmError` carrying its signature.
pub async fn close_and_reclaim(
    ledger: &dyn LedgerClient,
    wallet: &dyn WalletSigner,
    request: &ReclaimRequest,
) -> Result<ReclaimReceipt, ReclaimError> {
    request.validate()?;
    let signer = wallet.pubkey();
    if signer != request.owner {
        return Err(ReclaimError::BuildError(format!(
            "Wallet {signer} cannot sign for owner {}",
            request.owner
        )));
    }

    let plan = plan_reclaim(ledger, request).await?;
    log::info!(
        "Submitting close of {} accounts ({} instructions)",
        request.targets.len(),
        plan.instruction_count()
    );

    let signature = wallet
        .sign_and_send(plan.transaction)
        .await
        .map_err(|e| ReclaimError::SubmitError(e.to_string()))?;
    log::info!("Transaction {signature} sent, awaiting confirmation");

    let confirm_error = |reason: String| ReclaimError::ConfirmError {
        signature: signature.to_string(),
        reason,
    };

    let outcome = ledger
        .confirm_transaction(&signature, &plan.block_reference, CommitmentConfig::confirmed())
        .await
        .map_err(|e| confirm_error(format!("Confirmation failed: {e}")))?;

    match outcome {
        ConfirmationOutcome::Confirmed => {
            log::info!("Transaction {signature} confirmed");
            Ok(ReclaimReceipt {
                signature,
                breakdown: plan.breakdown,
                closed: request.targets.iter().map(|target| target.address).collect(),
            })
        }
        ConfirmationOutcome::Failed(err) => {
            log::warn!("Transaction {signature} failed on chain: {err}");
            Err(confirm_error(format!("Execution failed: {err}")))
        }
        ConfirmationOutcome::Expired => {
            log::warn!("Transaction {signature} expired before confirmation");
            Err(confirm_error(
                "Blockhash expired before the transaction was confirmed".to_string(),
            ))
        }
    }
}
