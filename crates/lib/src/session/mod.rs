pub mod session;
pub mod state;

pub use session::ReclaimSession;
pub use state::{OperationKind, OperationState};
