use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::Result;
use tracing::{info, warn};
use crate::config::Config;
use crate::constants::LOG_MAX_LINES;
use crate::flow::{Field, FlowOptions, MintFlow, Notice};
use crate::transactions::{GasConfig, SuiChainClient};
use crate::utils::{connect_client, shorten_id, NetworkState};
use crate::wallet::KeystoreWallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Error,
    Info,
    Success,
}

pub struct App {
    pub flow: MintFlow,
    pub network_state: NetworkState,
    pub sui_config_dir: PathBuf,
    pub gas_budget: u64,
    pub focus: Field,
    pub sui_balance: Option<u128>,
    pub message: Option<String>,
    pub message_type: MessageType,
    /// Blocking prompt; stays on screen until a key dismisses it
    pub prompt: Option<String>,
    pub is_switching_network: bool,
    pub activity_log: Vec<String>,
}

/// Sui client, chain client and wallet for one network
pub async fn connect_backends(
    network_state: &NetworkState,
    sui_config_dir: &Path,
    gas_budget: u64,
) -> Result<(Arc<SuiChainClient>, Arc<KeystoreWallet>)> {
    let client = Arc::new(connect_client(network_state).await?);
    let chain = Arc::new(SuiChainClient::new(
        Arc::clone(&client),
        GasConfig {
            budget: gas_budget,
            price: None,
        },
    ));
    let wallet = Arc::new(KeystoreWallet::new(client, sui_config_dir.to_path_buf()));
    Ok((chain, wallet))
}

impl App {
    pub async fn new(config: &Config) -> Result<App> {
        let (chain, wallet) = connect_backends(
            &config.network_state,
            &config.sui_config_dir,
            config.gas_budget,
        ).await?;
        info!(network = config.network_state.get_current_network(), rpc = config.network_state.get_current_rpc(), "connected to fullnode");

        let flow = MintFlow::new(chain, wallet, config.flow_options.clone());
        let mut app = App::with_flow(flow, config.network_state.clone(), config.sui_config_dir.clone(), config.gas_budget);

        if let Some(package_id) = &config.package_id {
            app.flow.set_field(Field::PackageId, package_id.as_str());
        }
        if let Some(recipient) = &config.recipient {
            app.flow.set_field(Field::RecipientAddress, recipient.as_str());
        }

        // Same as opening the page with a remembered wallet: try once, the user can retry with F2
        app.connect_wallet();
        Ok(app)
    }

    pub fn with_flow(flow: MintFlow, network_state: NetworkState, sui_config_dir: PathBuf, gas_budget: u64) -> App {
        App {
            flow,
            network_state,
            sui_config_dir,
            gas_budget,
            focus: Field::PackageId,
            sui_balance: None,
            message: None,
            message_type: MessageType::Info,
            prompt: None,
            is_switching_network: false,
            activity_log: Vec::new(),
        }
    }

    pub fn options(&self) -> &FlowOptions {
        self.flow.options()
    }

    pub fn wallet_address(&self) -> String {
        match self.flow.account() {
            Some(address) => shorten_id(&address.to_string()),
            None => "Not Connected".to_string(),
        }
    }

    pub fn log(&mut self, line: String) {
        self.activity_log.push(line);
        if self.activity_log.len() > LOG_MAX_LINES {
            self.activity_log.remove(0);
        }
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_message(&mut self, message_type: MessageType, message: String) {
        let tag = match message_type {
            MessageType::Error => "[ERROR]",
            MessageType::Info => "[INFO]",
            MessageType::Success => "[LOG]",
        };
        self.log(format!("{} {}", tag, message));
        self.message_type = message_type;
        self.message = Some(message);
    }

    pub fn apply_notice(&mut self, notice: Notice) {
        let text = notice.text().to_string();
        match notice {
            Notice::Prompt(_) => {
                self.log(format!("[PROMPT] {}", text));
                self.prompt = Some(text);
            }
            Notice::Info(_) => self.set_message(MessageType::Info, text),
            Notice::Success(_) => self.set_message(MessageType::Success, text),
            Notice::Error(_) => self.set_message(MessageType::Error, text),
        }
    }

    /// Returns true when a wallet is connected afterwards
    pub fn connect_wallet(&mut self) -> bool {
        match self.flow.connect_wallet() {
            Ok(address) => {
                self.set_message(MessageType::Success, format!("Wallet connected: {}", shorten_id(&address.to_string())));
                true
            }
            Err(e) => {
                warn!(error = %e, "wallet connection failed");
                self.set_message(MessageType::Error, format!("Failed to connect wallet: {:#}", e));
                false
            }
        }
    }

    pub fn toggle_wallet(&mut self) -> bool {
        if self.flow.account().is_none() {
            return self.connect_wallet();
        }

        if self.flow.disconnect_wallet() {
            self.sui_balance = None;
            self.set_message(MessageType::Info, "Wallet disconnected.".to_string());
            false
        } else {
            self.set_message(MessageType::Info, "A transaction is already in progress, please wait.".to_string());
            true
        }
    }
}

#[cfg(test)]
pub(crate) fn test_app(wallet: Arc<crate::flow::testing::FakeWallet>) -> App {
    let flow = MintFlow::new(crate::flow::testing::FakeChain::succeeding(), wallet, FlowOptions::default());
    App::with_flow(flow, NetworkState::new(), PathBuf::from("/tmp/sui"), 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::testing::FakeWallet;

    #[test]
    fn prompts_are_kept_apart_from_messages() {
        let mut app = test_app(FakeWallet::connected());
        app.apply_notice(Notice::Prompt("Please connect your wallet to mint an NFT.".to_string()));
        assert!(app.prompt.is_some());
        assert!(app.message.is_none());

        app.apply_notice(Notice::Error("Minting failed: boom".to_string()));
        assert_eq!(app.message_type, MessageType::Error);
        assert_eq!(app.message.as_deref(), Some("Minting failed: boom"));
        assert_eq!(app.activity_log.last().map(String::as_str), Some("[ERROR] Minting failed: boom"));
    }

    #[test]
    fn activity_log_is_capped() {
        let mut app = test_app(FakeWallet::connected());
        for i in 0..LOG_MAX_LINES + 5 {
            app.log(format!("line {}", i));
        }
        assert_eq!(app.activity_log.len(), LOG_MAX_LINES);
        assert_eq!(app.activity_log[0], "line 5");
    }

    #[test]
    fn wallet_toggle_connects_and_disconnects() {
        let mut app = test_app(FakeWallet::disconnected());
        assert_eq!(app.wallet_address(), "Not Connected");

        assert!(app.toggle_wallet());
        assert_ne!(app.wallet_address(), "Not Connected");

        app.sui_balance = Some(1);
        assert!(!app.toggle_wallet());
        assert!(app.sui_balance.is_none());
        assert_eq!(app.wallet_address(), "Not Connected");
    }
}
