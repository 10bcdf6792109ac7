use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;

use crate::{
    config::ScanConfig,
    error::ReclaimError,
    ledger::LedgerClient,
    scan::account::{EmptyAccountRecord, TokenAccountSnapshot},
};

/// Token programs whose accounts are scanned, in query order
pub fn token_programs(config: &ScanConfig) -> Vec<Pubkey> {
    let mut programs = vec![spl_token_interface::id()];
    if config.include_token_2022 {
        programs.push(spl_token_2022_interface::id());
    }
    programs
}

/// Finds every zero-balance token account of `owner` that the owner can close.
///
/// Each record's reclaimable amount is the rent-exempt minimum for its data length, fetched
/// once per distinct length. Any ledger failure aborts the scan; no partial list is returned.
pub async fn scan_empty_accounts(
    ledger: &dyn LedgerClient,
    owner: &Pubkey,
    config: &ScanConfig,
) -> Result<Vec<EmptyAccountRecord>, ReclaimError> {
    log::info!("Scanning token accounts owned by {owner}");

    let mut empty = Vec::new();
    for program_id in token_programs(config) {
        let accounts = ledger.get_token_accounts_by_owner(owner, &program_id).await.map_err(|e| {
            ReclaimError::ScanError(format!("Failed to fetch accounts for program {program_id}: {e}"))
        })?;
        log::debug!("Program {program_id} returned {} token accounts", accounts.len());

        for keyed in &accounts {
            let Some(snapshot) = TokenAccountSnapshot::from_keyed_account(keyed, &program_id) else {
                log::warn!("Skipping unparseable token account {}", keyed.pubkey);
                continue;
            };
            if snapshot.amount != 0 {
                continue;
            }
            if !snapshot.closable_by(owner) {
                log::warn!(
                    "Skipping empty account {} that {owner} cannot close ({:?}, close authority {:?})",
                    snapshot.address,
                    snapshot.state,
                    snapshot.close_authority
                );
                continue;
            }
            empty.push(snapshot);
        }
    }

    let mut rent_by_len: HashMap<usize, u64> = HashMap::new();
    let mut records = Vec::with_capacity(empty.len());
    for snapshot in &empty {
        let rent = match rent_by_len.get(&snapshot.data_len) {
            Some(rent) => *rent,
            None => {
                let rent = fetch_rent(ledger, snapshot.data_len).await?;
                rent_by_len.insert(snapshot.data_len, rent);
                rent
            }
        };
        records.push(EmptyAccountRecord::new(snapshot, rent));
    }

    records.sort_by_cached_key(|record| record.address.to_string());

    log::info!(
        "Found {} empty token accounts holding {} lamports",
        records.len(),
        records.iter().map(|record| record.reclaimable_lamports).sum::<u64>()
    );
    Ok(records)
}

async fn fetch_rent(ledger: &dyn LedgerClient, data_len: usize) -> Result<u64, ReclaimError> {
    let rent = ledger.get_rent_exempt_minimum(data_len).await.map_err(|e| {
        ReclaimError::ScanError(format!("Failed to fetch rent-exempt minimum for {data_len} bytes: {e}"))
    })?;
    if rent == 0 {
        return Err(ReclaimError::ScanError(format!(
            "Ledger reported a zero rent-exempt minimum for {data_len} bytes"
        )));
    }
    Ok(rent)
}
