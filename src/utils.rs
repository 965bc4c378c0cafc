use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use sui_sdk::SuiClient;
use sui_sdk::SuiClientBuilder;
use sui_sdk::types::base_types::{ObjectID, SuiAddress};
use crate::constants::{DEFAULT_NETWORK, NETWORKS, SUI_DECIMALS};
use dirs::home_dir;

pub fn shorten_id(id: &str) -> String {
    if id.len() > 16 && id.is_ascii() {
        // 0x598928d17a...4d73ffbd: keep the prefix and the last 8 chars
        format!("{}...{}", &id[..10], &id[id.len()-8..])
    } else {
        id.to_string()
    }
}

pub fn format_sui_balance(amount: u128) -> String {
    format!("{:.2} SUI", amount as f64 / SUI_DECIMALS)
}

/// Accepts `0x`-prefixed or bare hex, short forms are left-padded (`0x2`)
pub fn parse_object_id(value: &str) -> Result<ObjectID> {
    let value = value.trim();
    if value.is_empty() || value == "0x" {
        return Err(anyhow!("Object ID must not be empty"));
    }
    let literal = if value.starts_with("0x") {
        value.to_string()
    } else {
        format!("0x{}", value)
    };
    ObjectID::from_hex_literal(&literal)
        .map_err(|e| anyhow!("Invalid object ID '{}': {}", value, e))
}

pub fn parse_address(value: &str) -> Result<SuiAddress> {
    parse_object_id(value)
        .map(SuiAddress::from)
        .map_err(|_| anyhow!("Invalid Sui address '{}'", value.trim()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkState {
    pub current_network: usize,
    pub rpc_override: Option<String>,
}

impl NetworkState {
    pub fn new() -> Self {
        NetworkState {
            current_network: DEFAULT_NETWORK,
            rpc_override: None,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        let index = NETWORKS
            .iter()
            .position(|(network, _)| network.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| anyhow!(
                "Unknown network '{}' (expected one of: {})",
                name,
                NETWORKS.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ")
            ))?;
        Ok(NetworkState {
            current_network: index,
            rpc_override: None,
        })
    }

    /// Cycles to the next network; a custom RPC URL only applies to the network it was given for
    pub fn next_network(&mut self) {
        self.current_network = (self.current_network + 1) % NETWORKS.len();
        self.rpc_override = None;
    }

    pub fn get_current_network(&self) -> &str {
        NETWORKS[self.current_network].0
    }

    pub fn get_current_rpc(&self) -> &str {
        self.rpc_override
            .as_deref()
            .unwrap_or(NETWORKS[self.current_network].1)
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_sui_config_dir() -> Result<PathBuf> {
    Ok(home_dir()
        .ok_or_else(|| anyhow!("Failed to get home directory"))?
        .join(".sui")
        .join("sui_config"))
}

pub async fn connect_client(network_state: &NetworkState) -> Result<SuiClient> {
    SuiClientBuilder::default()
        .build(network_state.get_current_rpc())
        .await
        .with_context(|| format!("Failed to connect to {}", network_state.get_current_rpc()))
}
