use solana_sdk::signature::Signature;
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::error::ReclaimError;

/// Where the session is in the scan, select, close workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Scanning,
    Scanned,
    Building,
    Submitted(Signature),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Scan,
    Close,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Scan => write!(f, "scan"),
            OperationKind::Close => write!(f, "close"),
        }
    }
}

/// Holds the in-flight flag of one operation kind until dropped
pub(crate) struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool, kind: OperationKind) -> Result<Self, ReclaimError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).map_err(|_| {
            ReclaimError::OperationInProgress(format!("a {kind} is already running"))
        })?;
        Ok(Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
