use crate::sanitize::sanitize_message;
use serde::{Deserialize, Serialize};
use solana_client::client_error::ClientError;
use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum ReclaimError {
    #[error("Scan failed: {0}")]
    ScanError(String),

    #[error("Cannot build transaction: {0}")]
    BuildError(String),

    #[error("Submission failed: {0}")]
    SubmitError(String),

    #[error("Transaction {signature} failed: {reason}")]
    ConfirmError { signature: String, reason: String },

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Operation already in progress: {0}")]
    OperationInProgress(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ReclaimError {
    /// Signature of the broadcast transaction, if the failure happened after broadcast
    pub fn signature(&self) -> Option<&str> {
        match self {
            ReclaimError::ConfirmError { signature, .. } => Some(signature),
            _ => None,
        }
    }
}

impl From<ClientError> for ReclaimError {
    fn from(e: ClientError) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            ReclaimError::RpcError(e.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            ReclaimError::RpcError(sanitize_message(&e.to_string()))
        }
    }
}

impl From<solana_keychain::SignerError> for ReclaimError {
    fn from(_err: solana_keychain::SignerError) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            ReclaimError::SigningError(_err.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            ReclaimError::SigningError(sanitize_message(&_err.to_string()))
        }
    }
}

impl From<ProgramError> for ReclaimError {
    fn from(_err: ProgramError) -> Self {
        #[cfg(feature = "unsafe-debug")]
        {
            ReclaimError::BuildError(_err.to_string())
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            ReclaimError::BuildError(sanitize_message(&_err.to_string()))
        }
    }
}

impl From<bincode::Error> for ReclaimError {
    fn from(e: bincode::Error) -> Self {
        ReclaimError::InternalError(format!("Failed to serialize transaction: {e}"))
    }
}
