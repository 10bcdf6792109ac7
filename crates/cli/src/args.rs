use clap::{Args, ValueEnum};
use reclaim_lib::{constant::DEFAULT_CONFIG_PATH, Config, Network};

#[derive(Debug, Clone, ValueEnum)]
pub enum LoggingFormat {
    Standard,
    Json,
}

/// Global arguments used by all subcommands. Flags override values from the config file.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to configuration file (TOML format); defaults apply when it does not exist
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Solana RPC endpoint URL, overriding the cluster's public endpoint
    #[arg(long, global = true, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Cluster to operate on
    #[arg(long, global = true, value_enum)]
    pub network: Option<Network>,

    /// Wallet that receives the donation share
    #[arg(long, global = true, env = "RECLAIM_DONATION_ADDRESS")]
    pub donation_address: Option<String>,

    #[arg(long, global = true, value_enum, default_value = "standard")]
    pub logging_format: LoggingFormat,
}

impl GlobalArgs {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(network) = self.network {
            config.network.cluster = network;
        }
        if let Some(rpc_url) = &self.rpc_url {
            config.network.rpc_url = Some(rpc_url.clone());
        }
        if let Some(donation_address) = &self.donation_address {
            config.donation.address = Some(donation_address.clone());
        }
    }
}
