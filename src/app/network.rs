use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use crate::app::core::{connect_backends, App, MessageType};
use crate::wallet::WalletConnector;

impl App {
    /// Moves to the next network in `NETWORKS`. The new client is built
    /// without holding the lock; the form keeps its contents but any
    /// simulation is dropped, since it was run against the old chain.
    pub async fn switch_network(app: Arc<Mutex<App>>) {
        let (next_state, config_dir, gas_budget, was_connected) = {
            let mut app_guard = app.lock().await;
            if app_guard.flow.is_pending() {
                app_guard.set_message(MessageType::Info, "A transaction is already in progress, please wait.".to_string());
                return;
            }
            if app_guard.is_switching_network {
                return;
            }
            app_guard.is_switching_network = true;

            let mut next_state = app_guard.network_state.clone();
            next_state.next_network();
            let line = format!("[LOG] Switching to {} ...", next_state.get_current_network().to_uppercase());
            app_guard.log(line);
            (
                next_state,
                app_guard.sui_config_dir.clone(),
                app_guard.gas_budget,
                app_guard.flow.account().is_some(),
            )
        };

        let backends = connect_backends(&next_state, &config_dir, gas_budget).await;

        {
            let mut app_guard = app.lock().await;
            app_guard.is_switching_network = false;

            let (chain, wallet) = match backends {
                Ok(backends) => backends,
                Err(e) => {
                    warn!(error = %e, network = next_state.get_current_network(), "network switch failed");
                    app_guard.set_message(MessageType::Error, format!("Failed to switch network: {:#}", e));
                    return;
                }
            };

            let reconnect = if was_connected { Some(wallet.connect()) } else { None };

            if !app_guard.flow.replace_backends(chain, wallet) {
                app_guard.set_message(MessageType::Info, "A transaction is already in progress, please wait.".to_string());
                return;
            }

            app_guard.network_state = next_state;
            app_guard.sui_balance = None;
            info!(network = app_guard.network_state.get_current_network(), rpc = app_guard.network_state.get_current_rpc(), "switched network");

            let network = app_guard.network_state.get_current_network().to_uppercase();
            match reconnect {
                Some(Err(e)) => {
                    app_guard.set_message(MessageType::Error, format!("Switched to {}, but failed to connect wallet: {:#}", network, e));
                    return;
                }
                _ => app_guard.set_message(MessageType::Success, format!("Switched to {}", network)),
            }
        }

        App::refresh_balance(app).await;
    }
}
