use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constant::{
    DEVNET_RPC_URL, EXPLORER_BASE_URL, LOCALNET_RPC_URL, MAINNET_RPC_URL, TESTNET_RPC_URL,
};

/// Cluster the session talks to. Passed explicitly to every component that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl Network {
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::MainnetBeta => MAINNET_RPC_URL,
            Network::Devnet => DEVNET_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
            Network::Localnet => LOCALNET_RPC_URL,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "Mainnet Beta",
            Network::Devnet => "Devnet",
            Network::Testnet => "Testnet",
            Network::Localnet => "Localnet",
        }
    }

    /// Explorer link for a transaction signature on this cluster
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!("{EXPLORER_BASE_URL}/tx/{signature}{}", self.cluster_query())
    }

    /// Explorer link for an account address on this cluster
    pub fn explorer_address_url(&self, address: &str) -> String {
        format!("{EXPLORER_BASE_URL}/address/{address}{}", self.cluster_query())
    }

    fn cluster_query(&self) -> String {
        match self {
            Network::MainnetBeta => String::new(),
            Network::Devnet => "?cluster=devnet".to_string(),
            Network::Testnet => "?cluster=testnet".to_string(),
            Network::Localnet => "?cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899".to_string(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::MainnetBeta => "mainnet-beta",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}
