use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use std::{collections::HashSet, str::FromStr};

use crate::{error::ReclaimError, reclaim::fee::FeeSplit, scan::EmptyAccountRecord};

/// An account selected for closing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTarget {
    pub address: Pubkey,
    pub token_program: Pubkey,
    /// Known deposit, usually carried over from the scan
    pub deposit_lamports: Option<u64>,
}

impl CloseTarget {
    /// Target owned by the SPL Token program with an unknown deposit
    pub fn new(address: Pubkey) -> Self {
        Self { address, token_program: spl_token_interface::id(), deposit_lamports: None }
    }

    pub fn parse(address: &str) -> Result<Self, ReclaimError> {
        let address = Pubkey::from_str(address)
            .map_err(|e| ReclaimError::BuildError(format!("Invalid account address {address}: {e}")))?;
        Ok(Self::new(address))
    }

    pub fn with_token_program(mut self, token_program: Pubkey) -> Self {
        self.token_program = token_program;
        self
    }

    pub fn with_deposit(mut self, deposit_lamports: u64) -> Self {
        self.deposit_lamports = Some(deposit_lamports);
        self
    }
}

impl From<&EmptyAccountRecord> for CloseTarget {
    fn from(record: &EmptyAccountRecord) -> Self {
        Self {
            address: record.address,
            token_program: record.token_program,
            deposit_lamports: Some(record.reclaimable_lamports),
        }
    }
}

/// Everything needed to close a batch of accounts in one transaction
#[derive(Debug, Clone)]
pub struct ReclaimRequest {
    pub owner: Pubkey,
    pub targets: Vec<CloseTarget>,
    pub fee_split: FeeSplit,
    pub donation_address: Option<Pubkey>,
}

impl ReclaimRequest {
    pub fn new(owner: Pubkey, targets: Vec<CloseTarget>) -> Self {
        Self { owner, targets, fee_split: FeeSplit::default(), donation_address: None }
    }

    pub fn with_donation(mut self, fee_split: FeeSplit, donation_address: Option<Pubkey>) -> Self {
        self.fee_split = fee_split;
        self.donation_address = donation_address;
        self
    }

    /// Checks that need no network access
    pub fn validate(&self) -> Result<(), ReclaimError> {
        if self.targets.is_empty() {
            return Err(ReclaimError::BuildError("No accounts selected".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.targets.len());
        for target in &self.targets {
            if !seen.insert(target.address) {
                return Err(ReclaimError::BuildError(format!(
                    "Account {} selected more than once",
                    target.address
                )));
            }
            if !is_token_program(&target.token_program) {
                return Err(ReclaimError::BuildError(format!(
                    "Account {} is owned by unsupported program {}",
                    target.address, target.token_program
                )));
            }
        }

        if self.fee_split.has_donation() && self.donation_address.is_none() {
            return Err(ReclaimError::BuildError("donation destination not configured".to_string()));
        }
        Ok(())
    }
}

/// Parses an optional donation destination
pub fn parse_donation_address(address: Option<&str>) -> Result<Option<Pubkey>, ReclaimError> {
    address
        .map(|address| {
            Pubkey::from_str(address).map_err(|e| {
                ReclaimError::BuildError(format!("Invalid donation address {address}: {e}"))
            })
        })
        .transpose()
}

fn is_token_program(program_id: &Pubkey) -> bool {
    *program_id == spl_token_interface::id() || *program_id == spl_token_2022_interface::id()
}

/// Close instruction returning the account's lamports to `owner`
pub fn close_instruction(target: &CloseTarget, owner: &Pubkey) -> Result<Instruction, ReclaimError> {
    let instruction = if target.token_program == spl_token_2022_interface::id() {
        spl_token_2022_interface::instruction::close_account(
            &target.token_program,
            &target.address,
            owner,
            owner,
            &[],
        )?
    } else {
        spl_token_interface::instruction::close_account(
            &target.token_program,
            &target.address,
            owner,
            owner,
            &[],
        )?
    };
    Ok(instruction)
}

/// Builds the ordered instruction list: each close, followed by its donation transfer when a
/// donation applies. `deposits` holds the resolved deposit of each target, in order.
pub fn build_reclaim_instructions(
    request: &ReclaimRequest,
    deposits: &[u64],
) -> Result<Vec<Instruction>, ReclaimError> {
    if deposits.len() != request.targets.len() {
        return Err(ReclaimError::InternalError(format!(
            "Expected {} deposits, got {}",
            request.targets.len(),
            deposits.len()
        )));
    }

    let donation = match (request.fee_split.has_donation(), request.donation_address) {
        (false, _) => None,
        (true, Some(address)) => Some(address),
        (true, None) => {
            return Err(ReclaimError::BuildError("donation destination not configured".to_string()))
        }
    };

    let per_account = if donation.is_some() { 2 } else { 1 };
    let mut instructions = Vec::with_capacity(request.targets.len() * per_account);

    for (target, deposit) in request.targets.iter().zip(deposits) {
        instructions.push(close_instruction(target, &request.owner)?);
        if let Some(donation_address) = donation {
            instructions.push(solana_system_interface::instruction::transfer(
                &request.owner,
                &donation_address,
                request.fee_split.donation_for(*deposit),
            ));
        }
    }

    Ok(instructions)
}
