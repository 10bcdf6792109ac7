use solana_sdk::signature::Keypair;
use std::{fs, path::Path};

use crate::{error::ReclaimError, sanitize_error};

const KEYPAIR_LEN: usize = 64;

/// Where a private key comes from, detected from the string the user supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypairSource<'a> {
    /// Path to a JSON keypair file (`[u8; 64]` array, as written by `solana-keygen`)
    File(&'a Path),
    /// Inline `[0, 1, 2, ...]` array
    ByteArray(&'a str),
    Base58(&'a str),
}

impl<'a> KeypairSource<'a> {
    pub fn detect(value: &'a str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            return KeypairSource::ByteArray(trimmed);
        }
        let path = Path::new(trimmed);
        if path.is_file() {
            return KeypairSource::File(path);
        }
        KeypairSource::Base58(trimmed)
    }

    pub fn load(&self) -> Result<Keypair, ReclaimError> {
        match self {
            KeypairSource::File(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    ReclaimError::SigningError(format!(
                        "Failed to read keypair file: {}",
                        sanitize_error!(e)
                    ))
                })?;
                let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|_| {
                    ReclaimError::SigningError(
                        "Keypair file must contain a JSON array of 64 bytes".to_string(),
                    )
                })?;
                keypair_from_bytes(&bytes)
            }
            KeypairSource::ByteArray(array) => {
                let inner = &array[1..array.len() - 1];
                if inner.trim().is_empty() {
                    return Err(ReclaimError::SigningError("Byte array cannot be empty".to_string()));
                }
                let bytes = inner
                    .split(',')
                    .map(|byte| byte.trim().parse::<u8>())
                    .collect::<Result<Vec<u8>, _>>()
                    .map_err(|e| {
                        ReclaimError::SigningError(format!(
                            "Failed to parse byte array: {}",
                            sanitize_error!(e)
                        ))
                    })?;
                keypair_from_bytes(&bytes)
            }
            KeypairSource::Base58(encoded) => {
                let bytes = bs58::decode(encoded).into_vec().map_err(|e| {
                    ReclaimError::SigningError(format!("Invalid base58 string: {}", sanitize_error!(e)))
                })?;
                keypair_from_bytes(&bytes)
            }
        }
    }
}

/// Loads a keypair from a file path, an inline byte array, or a base58 string
pub fn load_keypair(value: &str) -> Result<Keypair, ReclaimError> {
    KeypairSource::detect(value).load()
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, ReclaimError> {
    if bytes.len() != KEYPAIR_LEN {
        return Err(ReclaimError::SigningError(format!(
            "Private key must be exactly {KEYPAIR_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Keypair::try_from(bytes).map_err(|e| {
        ReclaimError::SigningError(format!("Invalid private key bytes: {}", sanitize_error!(e)))
    })
}
