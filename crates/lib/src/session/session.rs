use parking_lot::RwLock;
use solana_sdk::pubkey::Pubkey;
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    config::Config,
    error::ReclaimError,
    ledger::LedgerClient,
    reclaim::{
        close_and_reclaim, parse_donation_address, plan_reclaim, CloseTarget, FeeBreakdown,
        FeeSplit, ReclaimPlan, ReclaimReceipt, ReclaimRequest,
    },
    scan::{scan_empty_accounts, EmptyAccountRecord},
    session::state::{FlightGuard, OperationKind, OperationState},
    wallet::WalletSigner,
};

#[derive(Debug, Default)]
struct SessionData {
    state: OperationState,
    records: Vec<EmptyAccountRecord>,
    selection: HashSet<Pubkey>,
    fee_split: FeeSplit,
    /// Bumped by every completed close
    close_generation: u64,
}

impl SessionData {
    fn selected_records(&self) -> impl Iterator<Item = &EmptyAccountRecord> {
        self.records.iter().filter(|record| self.selection.contains(&record.address))
    }

    fn ensure_known(&self, address: &Pubkey) -> Result<(), ReclaimError> {
        if self.records.iter().any(|record| record.address == *address) {
            Ok(())
        } else {
            Err(ReclaimError::ValidationError(format!(
                "Account {address} is not part of the latest scan"
            )))
        }
    }
}

/// Scan, select and close workflow for one owner.
///
/// At most one scan and one close run at a time. Results are applied only when an
/// operation completes, so dropping an in-flight future leaves the session untouched.
pub struct ReclaimSession {
    ledger: Arc<dyn LedgerClient>,
    owner: Pubkey,
    config: Config,
    data: RwLock<SessionData>,
    scan_in_flight: AtomicBool,
    close_in_flight: AtomicBool,
}

impl ReclaimSession {
    pub fn new(ledger: Arc<dyn LedgerClient>, owner: Pubkey, config: Config) -> Result<Self, ReclaimError> {
        let fee_split = FeeSplit::new(config.donation.default_percentage)
            .and_then(|_| FeeSplit::new(config.donation.initial_percentage()))
            .map_err(|e| ReclaimError::ConfigError(e.to_string()))?;
        Ok(Self {
            ledger,
            owner,
            config,
            data: RwLock::new(SessionData { fee_split, ..SessionData::default() }),
            scan_in_flight: AtomicBool::new(false),
            close_in_flight: AtomicBool::new(false),
        })
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> OperationState {
        if self.close_in_flight.load(Ordering::Acquire) {
            OperationState::Building
        } else if self.scan_in_flight.load(Ordering::Acquire) {
            OperationState::Scanning
        } else {
            self.data.read().state
        }
    }

    /// Records of the latest completed scan, minus any closed since
    pub fn records(&self) -> Vec<EmptyAccountRecord> {
        self.data.read().records.clone()
    }

    /// Selected addresses in scan order
    pub fn selection(&self) -> Vec<Pubkey> {
        self.data.read().selected_records().map(|record| record.address).collect()
    }

    pub fn is_selected(&self, address: &Pubkey) -> bool {
        self.data.read().selection.contains(address)
    }

    /// Replaces the scan result with a fresh one and selects every account found.
    ///
    /// A failed scan clears the previous result and selection. A scan that overlaps a
    /// completed close is discarded without touching the session.
    pub async fn scan(&self) -> Result<Vec<EmptyAccountRecord>, ReclaimError> {
        let _guard = FlightGuard::acquire(&self.scan_in_flight, OperationKind::Scan)?;
        let generation = self.data.read().close_generation;

        let result = scan_empty_accounts(self.ledger.as_ref(), &self.owner, &self.config.scan).await;

        let mut data = self.data.write();
        if data.close_generation != generation {
            log::warn!("Discarding scan for {} that overlapped a completed close", self.owner);
            return Err(ReclaimError::ScanError(
                "accounts were closed while scanning, scan again".to_string(),
            ));
        }
        match result {
            Ok(records) => {
                data.selection = records.iter().map(|record| record.address).collect();
                data.records = records.clone();
                data.state = OperationState::Scanned;
                Ok(records)
            }
            Err(e) => {
                data.records.clear();
                data.selection.clear();
                data.state = OperationState::Idle;
                Err(e)
            }
        }
    }

    /// Flips the selection of `address`, returning whether it is now selected
    pub fn toggle(&self, address: &Pubkey) -> Result<bool, ReclaimError> {
        let mut data = self.data.write();
        data.ensure_known(address)?;
        if data.selection.remove(address) {
            Ok(false)
        } else {
            data.selection.insert(*address);
            Ok(true)
        }
    }

    pub fn select_all(&self) {
        let mut data = self.data.write();
        data.selection = data.records.iter().map(|record| record.address).collect();
    }

    pub fn clear_selection(&self) {
        self.data.write().selection.clear();
    }

    /// Replaces the selection; nothing changes if any address is unknown
    pub fn set_selection(&self, addresses: &[Pubkey]) -> Result<(), ReclaimError> {
        let mut data = self.data.write();
        for address in addresses {
            data.ensure_known(address)?;
        }
        data.selection = addresses.iter().copied().collect();
        Ok(())
    }

    pub fn donation_percentage(&self) -> u8 {
        self.data.read().fee_split.percentage()
    }

    pub fn set_donation_percentage(&self, percentage: u8) -> Result<(), ReclaimError> {
        let max = self.config.donation.max_percentage;
        if percentage > max {
            return Err(ReclaimError::ValidationError(format!(
                "Donation percentage must be between 0 and {max}, got {percentage}"
            )));
        }
        let fee_split =
            FeeSplit::new(percentage).map_err(|e| ReclaimError::ValidationError(e.to_string()))?;
        self.data.write().fee_split = fee_split;
        Ok(())
    }

    /// Totals for the current selection and donation percentage
    pub fn fee_breakdown(&self) -> FeeBreakdown {
        let data = self.data.read();
        data.fee_split.breakdown(data.selected_records().map(|record| record.reclaimable_lamports))
    }

    /// Request for closing the current selection
    pub fn reclaim_request(&self) -> Result<ReclaimRequest, ReclaimError> {
        let donation_address = parse_donation_address(self.config.donation.address.as_deref())?;
        let data = self.data.read();
        let targets = data.selected_records().map(CloseTarget::from).collect();
        Ok(ReclaimRequest::new(self.owner, targets).with_donation(data.fee_split, donation_address))
    }

    /// Builds the transaction for the current selection without signing or sending it
    pub async fn plan(&self) -> Result<ReclaimPlan, ReclaimError> {
        let request = self.reclaim_request()?;
        plan_reclaim(self.ledger.as_ref(), &request).await
    }

    /// Closes the selected accounts. On confirmation the closed accounts leave the scan
    /// result and the selection is cleared; on failure nothing changes.
    pub async fn close_selected(&self, wallet: &dyn WalletSigner) -> Result<ReclaimReceipt, ReclaimError> {
        let _guard = FlightGuard::acquire(&self.close_in_flight, OperationKind::Close)?;

        let request = self.reclaim_request()?;
        let receipt = close_and_reclaim(self.ledger.as_ref(), wallet, &request).await?;

        let mut data = self.data.write();
        let closed: HashSet<Pubkey> = receipt.closed.iter().copied().collect();
        data.records.retain(|record| !closed.contains(&record.address));
        data.selection.clear();
        data.close_generation += 1;
        data.state = OperationState::Submitted(receipt.signature);
        Ok(receipt)
    }
}
