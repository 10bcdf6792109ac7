use serde::Serialize;

use crate::{
    constant::{LAMPORTS_PER_SOL, MAX_DONATION_PERCENTAGE},
    error::ReclaimError,
};

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Donation percentage applied to each reclaimed deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSplit {
    percentage: u8,
}

impl FeeSplit {
    pub fn new(percentage: u8) -> Result<Self, ReclaimError> {
        if percentage > MAX_DONATION_PERCENTAGE {
            return Err(ReclaimError::BuildError(format!(
                "Donation percentage must be between 0 and {MAX_DONATION_PERCENTAGE}, got {percentage}"
            )));
        }
        Ok(Self { percentage })
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn has_donation(&self) -> bool {
        self.percentage > 0
    }

    /// Donation share of a single deposit, rounded down
    pub fn donation_for(&self, deposit_lamports: u64) -> u64 {
        // percentage <= 100 so the quotient never exceeds the deposit
        (deposit_lamports as u128 * self.percentage as u128 / 100) as u64
    }

    /// Totals over a set of deposits; flooring is applied per deposit, not to the sum
    pub fn breakdown<I>(&self, deposits: I) -> FeeBreakdown
    where
        I: IntoIterator<Item = u64>,
    {
        let mut breakdown = FeeBreakdown { percentage: self.percentage, ..FeeBreakdown::default() };
        for deposit in deposits {
            breakdown.account_count += 1;
            breakdown.total_lamports += deposit;
            breakdown.donation_lamports += self.donation_for(deposit);
        }
        breakdown.user_lamports = breakdown.total_lamports - breakdown.donation_lamports;
        breakdown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeeBreakdown {
    pub account_count: usize,
    pub percentage: u8,
    pub total_lamports: u64,
    pub donation_lamports: u64,
    pub user_lamports: u64,
}

impl FeeBreakdown {
    pub fn total_sol(&self) -> f64 {
        lamports_to_sol(self.total_lamports)
    }

    pub fn donation_sol(&self) -> f64 {
        lamports_to_sol(self.donation_lamports)
    }

    pub fn user_sol(&self) -> f64 {
        lamports_to_sol(self.user_lamports)
    }
}
