use reclaim_lib::{
    ledger::{ConfirmationOutcome, MockLedgerClient},
    wallet::MockWalletSigner,
    Config, OperationState, ReclaimError, ReclaimSession,
};
use reclaim_tests::common::*;
use solana_sdk::{
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use std::sync::Arc;

fn config_with_donation(donation_address: Option<Pubkey>, percentage: u8) -> Config {
    let mut config = Config::default();
    config.donation.address = donation_address.map(|address| address.to_string());
    config.donation.default_percentage = percentage;
    config
}

#[tokio::test]
async fn test_three_accounts_with_ten_percent_donation() {
    let owner = Pubkey::new_unique();
    let donation = Pubkey::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 3),
        SCENARIO_DEPOSIT,
        ConfirmationOutcome::Confirmed,
    );
    let session = ReclaimSession::new(
        Arc::new(ledger),
        owner,
        config_with_donation(Some(donation), SCENARIO_DONATION_PERCENTAGE),
    )
    .unwrap();

    let records = session.scan().await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record.reclaimable_lamports == SCENARIO_DEPOSIT));

    let breakdown = session.fee_breakdown();
    assert_eq!(breakdown.total_lamports, 6_090_000);
    assert_eq!(breakdown.donation_lamports, 609_000);
    assert_eq!(breakdown.user_lamports, 5_481_000);

    let plan = session.plan().await.unwrap();
    assert_eq!(plan.instruction_count(), 6);
    let message = &plan.transaction.message;
    for (pair, record) in message.instructions.chunks(2).zip(&records) {
        let close_program = message.account_keys[pair[0].program_id_index as usize];
        let close_account = message.account_keys[pair[0].accounts[0] as usize];
        let transfer_program = message.account_keys[pair[1].program_id_index as usize];
        let transfer_destination = message.account_keys[pair[1].accounts[1] as usize];

        assert_eq!(close_program, spl_token_interface::id());
        assert_eq!(close_account, record.address);
        assert_eq!(transfer_program, solana_system_interface::program::ID);
        assert_eq!(transfer_destination, donation);
    }
}

#[tokio::test]
async fn test_confirmed_close_returns_signature() {
    let owner = Pubkey::new_unique();
    let signature = Signature::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 3),
        SCENARIO_DEPOSIT,
        ConfirmationOutcome::Confirmed,
    );
    let session = ReclaimSession::new(
        Arc::new(ledger),
        owner,
        config_with_donation(Some(Pubkey::new_unique()), SCENARIO_DONATION_PERCENTAGE),
    )
    .unwrap();
    session.scan().await.unwrap();

    let receipt = session.close_selected(&accepting_wallet(owner, signature)).await.unwrap();

    assert_eq!(receipt.signature, signature);
    assert_eq!(receipt.breakdown.user_lamports, 5_481_000);
    assert_eq!(session.state(), OperationState::Submitted(signature));
    assert!(session.records().is_empty());
}

#[tokio::test]
async fn test_execution_error_after_broadcast_is_confirm_error() {
    let owner = Pubkey::new_unique();
    let signature = Signature::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 2),
        SCENARIO_DEPOSIT,
        ConfirmationOutcome::Failed(TransactionError::InstructionError(
            0,
            InstructionError::Custom(11),
        )),
    );
    let session = ReclaimSession::new(Arc::new(ledger), owner, Config::default()).unwrap();
    session.scan().await.unwrap();

    let error = session.close_selected(&accepting_wallet(owner, signature)).await.unwrap_err();

    assert!(matches!(error, ReclaimError::ConfirmError { .. }));
    assert_eq!(error.signature(), Some(signature.to_string().as_str()));
    assert_eq!(session.state(), OperationState::Scanned);
    assert_eq!(session.records().len(), 2);
}

#[tokio::test]
async fn test_no_donation_builds_one_instruction_per_account() {
    let owner = Pubkey::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 4),
        SCENARIO_DEPOSIT,
        ConfirmationOutcome::Confirmed,
    );
    let session =
        ReclaimSession::new(Arc::new(ledger), owner, config_with_donation(None, 0)).unwrap();
    session.scan().await.unwrap();

    let mut wallet = MockWalletSigner::new();
    wallet.expect_pubkey().return_const(owner);
    wallet
        .expect_sign_and_send()
        .withf(|transaction: &Transaction| transaction.message.instructions.len() == 4)
        .times(1)
        .returning(|_| Ok(Signature::new_unique()));

    let receipt = session.close_selected(&wallet).await.unwrap();

    assert_eq!(receipt.closed.len(), 4);
    assert_eq!(receipt.breakdown.donation_lamports, 0);
    assert_eq!(receipt.breakdown.user_lamports, 4 * SCENARIO_DEPOSIT);
}

#[tokio::test]
async fn test_only_zero_balance_accounts_are_listed() {
    let owner = Pubkey::new_unique();
    let mut accounts = empty_token_accounts(&owner, 2);
    accounts.push(token_account(&owner, 500));
    let ledger = scenario_ledger(accounts, SCENARIO_DEPOSIT, ConfirmationOutcome::Confirmed);
    let session = ReclaimSession::new(Arc::new(ledger), owner, Config::default()).unwrap();

    let records = session.scan().await.unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_empty_wallet_yields_empty_list() {
    let owner = Pubkey::new_unique();
    let ledger = scenario_ledger(vec![], SCENARIO_DEPOSIT, ConfirmationOutcome::Confirmed);
    let session = ReclaimSession::new(Arc::new(ledger), owner, Config::default()).unwrap();

    assert!(session.scan().await.unwrap().is_empty());
    assert_eq!(session.state(), OperationState::Scanned);
}

#[tokio::test]
async fn test_empty_selection_fails_without_network() {
    let owner = Pubkey::new_unique();
    let session =
        ReclaimSession::new(Arc::new(MockLedgerClient::new()), owner, Config::default()).unwrap();
    let mut wallet = MockWalletSigner::new();
    wallet.expect_pubkey().return_const(owner);

    let error = session.close_selected(&wallet).await.unwrap_err();

    assert!(matches!(error, ReclaimError::BuildError(_)));
}

#[tokio::test]
async fn test_donation_without_destination_is_build_error() {
    let owner = Pubkey::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 1),
        SCENARIO_DEPOSIT,
        ConfirmationOutcome::Confirmed,
    );
    let session =
        ReclaimSession::new(Arc::new(ledger), owner, config_with_donation(None, 5)).unwrap();
    session.scan().await.unwrap();
    session.set_donation_percentage(5).unwrap();
    let mut wallet = MockWalletSigner::new();
    wallet.expect_pubkey().return_const(owner);

    let error = session.close_selected(&wallet).await.unwrap_err();

    assert_eq!(error, ReclaimError::BuildError("donation destination not configured".to_string()));
}
