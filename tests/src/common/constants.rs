/// Deposit used by the three-account scenario
pub const SCENARIO_DEPOSIT: u64 = 2_030_000;

pub const SCENARIO_DONATION_PERCENTAGE: u8 = 10;

pub const TEST_LAST_VALID_BLOCK_HEIGHT: u64 = 1_000;
