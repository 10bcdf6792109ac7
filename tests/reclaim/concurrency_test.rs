use reclaim_lib::{Config, OperationState, ReclaimError, ReclaimSession};
use reclaim_tests::common::*;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::sync::Arc;

fn no_donation() -> Config {
    let mut config = Config::default();
    config.donation.default_percentage = 0;
    config
}

#[tokio::test]
async fn test_second_scan_rejected_while_first_in_flight() {
    let owner = Pubkey::new_unique();
    let ledger = Arc::new(GatedLedger::new(empty_token_accounts(&owner, 2), SCENARIO_DEPOSIT));
    let entered = ledger.entered.clone();
    let release = ledger.release.clone();
    let session = ReclaimSession::new(ledger, owner, no_donation()).unwrap();

    let first = session.scan();
    let second = async {
        entered.notified().await;
        assert_eq!(session.state(), OperationState::Scanning);
        let result = session.scan().await;
        release.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap().len(), 2);
    assert!(matches!(second, Err(ReclaimError::OperationInProgress(_))));
    assert_eq!(session.state(), OperationState::Scanned);
}

#[tokio::test]
async fn test_abandoned_scan_leaves_session_untouched() {
    let owner = Pubkey::new_unique();
    let ledger = Arc::new(GatedLedger::new(empty_token_accounts(&owner, 3), SCENARIO_DEPOSIT));
    let entered = ledger.entered.clone();
    let session = ReclaimSession::new(ledger, owner, no_donation()).unwrap();

    tokio::select! {
        _ = session.scan() => panic!("scan should still be waiting on the ledger"),
        _ = entered.notified() => {}
    }

    assert_eq!(session.state(), OperationState::Idle);
    assert!(session.records().is_empty());

    // The guard was released with the dropped future, and the gate only holds the first query
    let records = session.scan().await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(session.state(), OperationState::Scanned);
}

#[tokio::test]
async fn test_second_close_rejected_while_first_in_flight() {
    let owner = Pubkey::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 2),
        SCENARIO_DEPOSIT,
        reclaim_lib::ledger::ConfirmationOutcome::Confirmed,
    );
    let session = ReclaimSession::new(Arc::new(ledger), owner, no_donation()).unwrap();
    session.scan().await.unwrap();
    let wallet = GatedWallet::new(owner);

    let first = session.close_selected(&wallet);
    let second = async {
        wallet.entered.notified().await;
        assert_eq!(session.state(), OperationState::Building);
        let result = session.close_selected(&wallet).await;
        wallet.release.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap().closed.len(), 2);
    assert!(matches!(second, Err(ReclaimError::OperationInProgress(_))));
    assert!(matches!(session.state(), OperationState::Submitted(_)));
}

#[tokio::test]
async fn test_scan_allowed_while_close_in_flight() {
    let owner = Pubkey::new_unique();
    let ledger = scenario_ledger(
        empty_token_accounts(&owner, 1),
        SCENARIO_DEPOSIT,
        reclaim_lib::ledger::ConfirmationOutcome::Confirmed,
    );
    let session = ReclaimSession::new(Arc::new(ledger), owner, no_donation()).unwrap();
    session.scan().await.unwrap();
    let wallet = GatedWallet::new(owner);

    let close = session.close_selected(&wallet);
    let rescan = async {
        wallet.entered.notified().await;
        let result = session.scan().await;
        wallet.release.notify_one();
        result
    };
    let (close, rescan) = tokio::join!(close, rescan);

    assert!(close.is_ok());
    assert!(rescan.is_ok());
}

#[tokio::test]
async fn test_scan_overlapping_completed_close_is_discarded() {
    let owner = Pubkey::new_unique();
    let ledger = Arc::new(
        GatedLedger::new(empty_token_accounts(&owner, 2), SCENARIO_DEPOSIT).gate_query(1),
    );
    let entered = ledger.entered.clone();
    let release = ledger.release.clone();
    let session = ReclaimSession::new(ledger, owner, no_donation()).unwrap();
    session.scan().await.unwrap();
    let signature = Signature::new_unique();
    let wallet = accepting_wallet(owner, signature);

    let rescan = session.scan();
    let close = async {
        entered.notified().await;
        let result = session.close_selected(&wallet).await;
        release.notify_one();
        result
    };
    let (rescan, close) = tokio::join!(rescan, close);

    assert_eq!(close.unwrap().closed.len(), 2);
    assert!(matches!(rescan, Err(ReclaimError::ScanError(_))));
    assert_eq!(session.state(), OperationState::Submitted(signature));
    assert!(session.records().is_empty());
    assert!(session.selection().is_empty());
}
