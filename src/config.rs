use std::path::PathBuf;
use anyhow::{bail, Result};
use clap::Parser;
use crate::{
    constants::{DEFAULT_LOG_FILE, GAS_BUDGET, PLACEHOLDER_IMAGE_URL},
    flow::FlowOptions,
    utils::{default_sui_config_dir, NetworkState},
};

/// Mint loyalty card NFTs on Sui from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "loyalty-mint", version, about)]
pub struct Cli {
    /// Network to connect to: devnet, testnet or mainnet
    #[arg(long, default_value = "testnet")]
    pub network: String,

    /// Fullnode RPC URL, overriding the network's default
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Pre-fill the package ID field
    #[arg(long)]
    pub package_id: Option<String>,

    /// Pre-fill the recipient address field
    #[arg(long)]
    pub recipient: Option<String>,

    /// Image URL passed to mint_loyalty
    #[arg(long, default_value = PLACEHOLDER_IMAGE_URL)]
    pub image_url: String,

    /// Gas budget in MIST
    #[arg(long, default_value_t = GAS_BUDGET)]
    pub gas_budget: u64,

    /// Directory holding client.yaml and sui.keystore (defaults to ~/.sui/sui_config)
    #[arg(long)]
    pub sui_config: Option<PathBuf>,

    /// Dry-run with the recipient from the form instead of your own address
    #[arg(long)]
    pub simulate_recipient: bool,

    /// Where to write logs; the terminal itself is taken by the UI
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub network_state: NetworkState,
    pub package_id: Option<String>,
    pub recipient: Option<String>,
    pub flow_options: FlowOptions,
    pub gas_budget: u64,
    pub sui_config_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let mut network_state = NetworkState::from_name(&self.network)?;
        if let Some(url) = self.rpc_url {
            if url.trim().is_empty() {
                bail!("--rpc-url must not be empty");
            }
            network_state.rpc_override = Some(url.trim().to_string());
        }

        if self.gas_budget == 0 {
            bail!("--gas-budget must be greater than zero");
        }
        if self.image_url.trim().is_empty() {
            bail!("--image-url must not be empty");
        }

        let sui_config_dir = match self.sui_config {
            Some(dir) => dir,
            None => default_sui_config_dir()?,
        };

        Ok(Config {
            network_state,
            package_id: self.package_id,
            recipient: self.recipient,
            flow_options: FlowOptions {
                image_url: self.image_url,
                simulate_recipient: self.simulate_recipient,
            },
            gas_budget: self.gas_budget,
            sui_config_dir,
            log_file: self.log_file,
        })
    }
}
