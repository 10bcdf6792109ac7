use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::{fs, path::Path, str::FromStr};

use crate::{
    constant::{DEFAULT_DONATION_PERCENTAGE, MAX_DONATION_PERCENTAGE},
    error::ReclaimError,
    network::Network,
    sanitize_error,
};

/// Application-supplied settings. Loaded once by the caller and threaded explicitly
/// into the scanner, the builder and the session; nothing here is read from globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub donation: DonationConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub cluster: Network,
    /// Overrides the cluster's public endpoint when set
    pub rpc_url: Option<String>,
}

impl NetworkConfig {
    pub fn rpc_url(&self) -> String {
        self.rpc_url.clone().unwrap_or_else(|| self.cluster.default_rpc_url().to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationConfig {
    /// Destination wallet for the donation share
    pub address: Option<String>,
    /// Percentage a session starts with. Only applied when `address` is set
    #[serde(default = "default_donation_percentage")]
    pub default_percentage: u8,
    #[serde(default = "max_donation_percentage")]
    pub max_percentage: u8,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            address: None,
            default_percentage: DEFAULT_DONATION_PERCENTAGE,
            max_percentage: MAX_DONATION_PERCENTAGE,
        }
    }
}

impl DonationConfig {
    pub fn address_pubkey(&self) -> Result<Option<Pubkey>, ReclaimError> {
        self.address
            .as_deref()
            .map(|address| {
                Pubkey::from_str(address).map_err(|e| {
                    ReclaimError::ConfigError(format!("Invalid donation address {address}: {e}"))
                })
            })
            .transpose()
    }

    /// Starting donation percentage: `default_percentage` with a destination, zero without one
    pub fn initial_percentage(&self) -> u8 {
        if self.address.is_some() {
            self.default_percentage
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_include_token_2022")]
    pub include_token_2022: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { include_token_2022: default_include_token_2022() }
    }
}

fn default_donation_percentage() -> u8 {
    DEFAULT_DONATION_PERCENTAGE
}

fn max_donation_percentage() -> u8 {
    MAX_DONATION_PERCENTAGE
}

fn default_include_token_2022() -> bool {
    true
}

impl Config {
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ReclaimError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ReclaimError::ConfigError(format!("Failed to read config file: {}", sanitize_error!(e)))
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            ReclaimError::ConfigError(format!("Failed to parse config file: {}", sanitize_error!(e)))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the file when it exists, otherwise falls back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ReclaimError> {
        if path.as_ref().exists() {
            Self::load_config(path)
        } else {
            log::info!("No config file at {}, using defaults", path.as_ref().display());
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> Result<(), ReclaimError> {
        let donation = &self.donation;
        if donation.max_percentage > MAX_DONATION_PERCENTAGE {
            return Err(ReclaimError::ConfigError(format!(
                "donation.max_percentage must be at most {MAX_DONATION_PERCENTAGE}, got {}",
                donation.max_percentage
            )));
        }
        if donation.default_percentage > donation.max_percentage {
            return Err(ReclaimError::ConfigError(format!(
                "donation.default_percentage ({}) exceeds donation.max_percentage ({})",
                donation.default_percentage, donation.max_percentage
            )));
        }
        donation.address_pubkey()?;
        Ok(())
    }
}
