use std::sync::Arc;
use tokio::sync::Mutex;
use anyhow::anyhow;
use tracing::warn;
use crate::app::core::App;
use crate::flow::{Notice, SimulationOutcome};

impl App {
    /// Starts a dry-run in the background; the lock is only held to begin and
    /// to complete it, so the UI keeps drawing while the node answers
    pub async fn start_simulation(app: Arc<Mutex<App>>) {
        let pending = {
            let mut app_guard = app.lock().await;
            match app_guard.flow.begin_simulate() {
                Ok(pending) => {
                    let line = format!("[LOG] Simulating {} ...", pending.call().target());
                    app_guard.log(line);
                    app_guard.clear_message();
                    pending
                }
                Err(notice) => {
                    app_guard.apply_notice(notice);
                    return;
                }
            }
        };

        let call = pending.call().clone();
        let app_clone = Arc::clone(&app);
        tokio::spawn(async move {
            // the phase must leave Simulating even if the request task panics
            let outcome = match tokio::spawn(pending.run()).await {
                Ok(outcome) => outcome,
                Err(e) => SimulationOutcome::failed(call, anyhow!("simulation task failed: {}", e)),
            };
            let mut app_locked = app_clone.lock().await;
            let notice = app_locked.flow.complete_simulate(outcome);
            app_locked.apply_notice(notice);
        });
    }

    pub async fn start_execution(app: Arc<Mutex<App>>) {
        let pending = {
            let mut app_guard = app.lock().await;
            match app_guard.flow.begin_execute() {
                Ok(pending) => {
                    let line = format!(
                        "[LOG] Minting to {}, approve the transaction in your wallet ...",
                        pending.call().recipient
                    );
                    app_guard.log(line);
                    app_guard.clear_message();
                    pending
                }
                Err(notice) => {
                    app_guard.apply_notice(notice);
                    return;
                }
            }
        };

        let app_clone = Arc::clone(&app);
        tokio::spawn(async move {
            let result = match tokio::spawn(pending.run()).await {
                Ok(result) => result,
                Err(e) => Err(anyhow!("mint task failed: {}", e)),
            };
            let minted = {
                let mut app_locked = app_clone.lock().await;
                let notice = app_locked.flow.complete_execute(result);
                let minted = matches!(notice, Notice::Success(_));
                app_locked.apply_notice(notice);
                minted
            };
            if minted {
                App::refresh_balance(app_clone).await;
            }
        });
    }

    pub async fn refresh_balance(app: Arc<Mutex<App>>) {
        let (chain, account) = {
            let app_guard = app.lock().await;
            (app_guard.flow.chain(), app_guard.flow.account())
        };
        let Some(account) = account else {
            return;
        };

        match chain.balance(account).await {
            Ok(balance) => {
                let mut app_guard = app.lock().await;
                // the wallet may have changed while the request was out
                if app_guard.flow.account() == Some(account) {
                    app_guard.sui_balance = Some(balance);
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch balance");
                // log only: the message line may be carrying a mint receipt
                let mut app_guard = app.lock().await;
                app_guard.log(format!("[ERROR] Failed to fetch balance: {:#}", e));
            }
        }
    }
}
