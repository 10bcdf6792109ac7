pub mod fee;
pub mod instruction;
pub mod submit;
pub mod transaction;

pub use fee::{lamports_to_sol, FeeBreakdown, FeeSplit};
pub use instruction::{parse_donation_address, CloseTarget, ReclaimRequest};
pub use submit::{close_and_reclaim, ReclaimReceipt};
pub use transaction::{plan_reclaim, ReclaimPlan};
