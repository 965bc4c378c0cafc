use std::sync::Arc;
use anyhow::Result;
use sui_sdk::types::base_types::SuiAddress;
use tracing::{info, warn};
use crate::{
    constants::PLACEHOLDER_IMAGE_URL,
    error::ValidationError,
    transactions::{ChainClient, MintCall},
    wallet::{Receipt, WalletConnector},
};
use super::state::{Field, MintRequest, Phase, SimulationResult};

/// What the user should be told after an operation.
/// `Prompt` is blocking: the front-end must show it until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Prompt(String),
    Info(String),
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Prompt(text) | Notice::Info(text) | Notice::Success(text) | Notice::Error(text) => text,
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(error: ValidationError) -> Self {
        Notice::Prompt(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOptions {
    pub image_url: String,
    /// Dry-run with the form's recipient instead of the signer's own address
    pub simulate_recipient: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            simulate_recipient: false,
        }
    }
}

/// A dry-run that has been started but not yet sent
pub struct PendingSimulation {
    chain: Arc<dyn ChainClient>,
    call: MintCall,
    sender: SuiAddress,
}

pub struct SimulationOutcome {
    call: MintCall,
    result: Result<SimulationResult>,
}

impl SimulationOutcome {
    /// The dry-run never produced an answer, e.g. its task died
    pub fn failed(call: MintCall, error: anyhow::Error) -> Self {
        Self {
            call,
            result: Err(error),
        }
    }
}

impl PendingSimulation {
    pub fn call(&self) -> &MintCall {
        &self.call
    }

    pub async fn run(self) -> SimulationOutcome {
        let result = async {
            let tx = self.chain.build(&self.call, self.sender).await?;
            self.chain.dry_run(tx).await
        }
        .await;

        SimulationOutcome {
            call: self.call,
            result,
        }
    }
}

/// A mint that has been started but not yet signed
pub struct PendingExecution {
    chain: Arc<dyn ChainClient>,
    wallet: Arc<dyn WalletConnector>,
    call: MintCall,
    sender: SuiAddress,
}

impl PendingExecution {
    pub fn call(&self) -> &MintCall {
        &self.call
    }

    pub async fn run(self) -> Result<Receipt> {
        let tx = self.chain.build(&self.call, self.sender).await?;
        Ok(self.wallet.sign_and_submit(tx).await?)
    }
}

/// Owns the mint form and drives simulate → execute.
///
/// Each operation comes in two shapes. `simulate`/`execute` run to
/// completion while holding `&mut self`. The `begin_*`/`complete_*` pairs
/// let a caller that keeps the flow behind a lock release it while the
/// returned `Pending*` value talks to the network.
pub struct MintFlow {
    chain: Arc<dyn ChainClient>,
    wallet: Arc<dyn WalletConnector>,
    options: FlowOptions,
    request: MintRequest,
    phase: Phase,
    simulation: Option<SimulationResult>,
}

impl MintFlow {
    pub fn new(chain: Arc<dyn ChainClient>, wallet: Arc<dyn WalletConnector>, options: FlowOptions) -> Self {
        Self {
            chain,
            wallet,
            options,
            request: MintRequest::default(),
            phase: Phase::Idle,
            simulation: None,
        }
    }

    pub fn request(&self) -> &MintRequest {
        &self.request
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn simulation(&self) -> Option<&SimulationResult> {
        self.simulation.as_ref()
    }

    pub fn ready_transaction(&self) -> Option<&MintCall> {
        self.phase.ready_transaction()
    }

    pub fn options(&self) -> &FlowOptions {
        &self.options
    }

    pub fn is_pending(&self) -> bool {
        self.phase.is_pending()
    }

    pub fn account(&self) -> Option<SuiAddress> {
        self.wallet.current_account()
    }

    pub fn chain(&self) -> Arc<dyn ChainClient> {
        Arc::clone(&self.chain)
    }

    pub fn can_simulate(&self) -> bool {
        !self.is_pending() && self.account().is_some() && self.request.is_complete()
    }

    pub fn can_execute(&self) -> bool {
        self.account().is_some() && matches!(self.phase, Phase::Simulated(_))
    }

    // every mutation of the request goes through here
    fn invalidate(&mut self) {
        self.simulation = None;
        self.phase = Phase::Idle;
    }

    /// Replace a field's value. Returns `false` (and changes nothing) while
    /// an operation is pending.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_pending() {
            return false;
        }
        *self.request.field_mut(field) = value.into();
        self.invalidate();
        true
    }

    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if self.is_pending() {
            return false;
        }
        self.request.field_mut(field).push(c);
        self.invalidate();
        true
    }

    pub fn pop_char(&mut self, field: Field) -> bool {
        if self.is_pending() {
            return false;
        }
        self.request.field_mut(field).pop();
        self.invalidate();
        true
    }

    /// Swap the chain and wallet, e.g. after a network change. A simulation
    /// made against the old backends no longer applies.
    pub fn replace_backends(&mut self, chain: Arc<dyn ChainClient>, wallet: Arc<dyn WalletConnector>) -> bool {
        if self.is_pending() {
            return false;
        }
        self.chain = chain;
        self.wallet = wallet;
        self.invalidate();
        true
    }

    pub fn connect_wallet(&mut self) -> Result<SuiAddress> {
        if self.is_pending() {
            anyhow::bail!("A transaction is already in progress, please wait.");
        }
        let address = self.wallet.connect()?;
        self.invalidate();
        Ok(address)
    }

    pub fn disconnect_wallet(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        self.wallet.disconnect();
        self.invalidate();
        true
    }

    fn busy_notice() -> Notice {
        Notice::Info("A transaction is already in progress, please wait.".to_string())
    }

    pub fn begin_simulate(&mut self) -> Result<PendingSimulation, Notice> {
        if self.is_pending() {
            return Err(Self::busy_notice());
        }
        let account = self.account().ok_or(ValidationError::WalletNotConnected)?;
        if !self.request.is_complete() {
            return Err(ValidationError::MissingFields.into());
        }

        let recipient = if self.options.simulate_recipient {
            self.request.recipient_address.clone()
        } else {
            account.to_string()
        };
        let call = MintCall::new(&self.request.package_id, &recipient, &self.options.image_url);

        self.simulation = None;
        self.phase = Phase::Simulating;
        info!(move_call = %call.target(), recipient = %call.recipient, "simulating mint");

        Ok(PendingSimulation {
            chain: Arc::clone(&self.chain),
            call,
            sender: account,
        })
    }

    pub fn complete_simulate(&mut self, outcome: SimulationOutcome) -> Notice {
        if self.phase != Phase::Simulating {
            warn!("dropping simulation result, request changed while it was running");
            return Notice::Info("Discarded an outdated simulation result.".to_string());
        }

        match outcome.result {
            Ok(SimulationResult::Succeeded(effects)) => {
                info!(net_gas = effects.gas.net_cost(), created = effects.created.len(), "simulation succeeded");
                self.simulation = Some(SimulationResult::Succeeded(effects));
                self.phase = Phase::Simulated(outcome.call);
                let text = if self.options.simulate_recipient {
                    "Simulation succeeded. You can now mint the NFT.".to_string()
                } else {
                    "Simulation succeeded (dry-run minted to your own address). You can now mint the NFT.".to_string()
                };
                Notice::Success(text)
            }
            Ok(SimulationResult::Failed { message }) => {
                warn!(%message, "simulation reported an error");
                self.simulation = Some(SimulationResult::Failed { message: message.clone() });
                self.phase = Phase::Idle;
                Notice::Error(format!("Simulation failed: {}", message))
            }
            Err(e) => {
                warn!(error = %e, "simulation request failed");
                self.simulation = None;
                self.phase = Phase::Idle;
                Notice::Error(format!("Simulation failed: {:#}", e))
            }
        }
    }

    pub fn begin_execute(&mut self) -> Result<PendingExecution, Notice> {
        if self.is_pending() {
            return Err(Self::busy_notice());
        }
        let account = self.account().ok_or(ValidationError::WalletNotConnected)?;
        let Phase::Simulated(ready) = &self.phase else {
            return Err(ValidationError::NotSimulated.into());
        };
        let ready = ready.clone();

        // Fresh call for the real recipient; the simulated one is kept for rollback
        let call = MintCall::new(
            &self.request.package_id,
            &self.request.recipient_address,
            &self.options.image_url,
        );
        self.phase = Phase::Executing(ready);
        info!(move_call = %call.target(), recipient = %call.recipient, "minting");

        Ok(PendingExecution {
            chain: Arc::clone(&self.chain),
            wallet: Arc::clone(&self.wallet),
            call,
            sender: account,
        })
    }

    pub fn complete_execute(&mut self, result: Result<Receipt>) -> Notice {
        let Phase::Executing(ready) = std::mem::take(&mut self.phase) else {
            warn!("dropping mint result, no mint was in progress");
            return Notice::Info("Discarded an outdated mint result.".to_string());
        };

        match result {
            Ok(receipt) => {
                info!(digest = %receipt.digest, "mint executed");
                self.request.clear();
                self.invalidate();
                Notice::Success(format!("NFT minted successfully! (Tx: {})", receipt.digest))
            }
            Err(e) => {
                warn!(error = %e, "mint failed");
                self.phase = Phase::Simulated(ready);
                Notice::Error(format!("Minting failed: {:#}", e))
            }
        }
    }

    pub async fn simulate(&mut self) -> Notice {
        match self.begin_simulate() {
            Ok(pending) => {
                let outcome = pending.run().await;
                self.complete_simulate(outcome)
            }
            Err(notice) => notice,
        }
    }

    pub async fn execute(&mut self) -> Notice {
        match self.begin_execute() {
            Ok(pending) => {
                let result = pending.run().await;
                self.complete_execute(result)
            }
            Err(notice) => notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::flow::testing::{success_effects, test_account, FakeChain, FakeWallet};

    fn filled_flow(chain: Arc<FakeChain>, wallet: Arc<FakeWallet>) -> MintFlow {
        let mut flow = MintFlow::new(chain, wallet, FlowOptions::default());
        flow.set_field(Field::PackageId, "0xabc");
        flow.set_field(Field::RecipientAddress, "0xdef");
        flow
    }

    #[tokio::test]
    async fn no_account_blocks_both_operations() {
        let chain = FakeChain::succeeding();
        let wallet = FakeWallet::disconnected();
        let mut flow = filled_flow(chain.clone(), wallet.clone());

        let notice = flow.simulate().await;
        assert_eq!(notice, Notice::Prompt(ValidationError::WalletNotConnected.to_string()));
        let notice = flow.execute().await;
        assert_eq!(notice, Notice::Prompt(ValidationError::WalletNotConnected.to_string()));

        assert!(chain.built.lock().is_empty());
        assert_eq!(*chain.dry_runs.lock(), 0);
        assert_eq!(wallet.submissions(), 0);
        assert_eq!(flow.phase(), &Phase::Idle);
    }

    #[tokio::test]
    async fn blank_fields_are_a_validation_prompt() {
        let chain = FakeChain::succeeding();
        let mut flow = MintFlow::new(chain.clone(), FakeWallet::connected(), FlowOptions::default());
        flow.set_field(Field::PackageId, "0xabc");
        flow.set_field(Field::RecipientAddress, "   ");

        let notice = flow.simulate().await;
        assert_eq!(notice, Notice::Prompt(ValidationError::MissingFields.to_string()));
        assert!(chain.built.lock().is_empty());
        assert!(!flow.can_simulate());
    }

    #[tokio::test]
    async fn successful_simulation_enables_execute() {
        let chain = FakeChain::succeeding();
        let mut flow = filled_flow(chain.clone(), FakeWallet::connected());
        assert!(flow.can_simulate());
        assert!(!flow.can_execute());

        let notice = flow.simulate().await;
        assert!(matches!(notice, Notice::Success(ref text) if text.contains("Simulation succeeded")));
        assert!(flow.ready_transaction().is_some());
        assert!(flow.can_execute());
        assert_eq!(flow.simulation(), Some(&success_effects()));

        // the dry-run mints to the signer, not the form recipient
        let simulated = chain.last_built().unwrap();
        assert_eq!(simulated.recipient, test_account().to_string());
        assert_eq!(simulated.package_id, "0xabc");
    }

    #[tokio::test]
    async fn simulate_recipient_option_dry_runs_the_real_recipient() {
        let chain = FakeChain::succeeding();
        let options = FlowOptions { simulate_recipient: true, ..FlowOptions::default() };
        let mut flow = MintFlow::new(chain.clone(), FakeWallet::connected(), options);
        flow.set_field(Field::PackageId, "0xabc");
        flow.set_field(Field::RecipientAddress, "0xdef");

        flow.simulate().await;
        assert_eq!(chain.last_built().unwrap().recipient, "0xdef");
    }

    #[tokio::test]
    async fn scenario_b_dry_run_error_keeps_execute_disabled() {
        let chain = FakeChain::replying(SimulationResult::Failed {
            message: "insufficient gas".to_string(),
        });
        let mut flow = filled_flow(chain, FakeWallet::connected());

        let notice = flow.simulate().await;
        assert!(matches!(notice, Notice::Error(ref text) if text.contains("insufficient gas")));
        assert!(flow.ready_transaction().is_none());
        assert!(!flow.can_execute());
        assert_eq!(flow.simulation().and_then(|s| s.error_message()), Some("insufficient gas"));
        assert!(!flow.is_pending());
    }

    #[tokio::test]
    async fn network_error_leaves_no_stale_ready_transaction() {
        let chain = FakeChain::succeeding();
        let mut flow = filled_flow(chain, FakeWallet::connected());
        flow.simulate().await;
        assert!(flow.can_execute());

        // same inputs, but the node is now unreachable
        let unreachable = FakeChain::erroring("connection refused");
        assert!(flow.replace_backends(unreachable, FakeWallet::connected()));
        let notice = flow.simulate().await;

        assert!(matches!(notice, Notice::Error(ref text) if text.contains("connection refused")));
        assert_eq!(flow.phase(), &Phase::Idle);
        assert!(flow.simulation().is_none());
        assert!(flow.ready_transaction().is_none());
    }

    #[tokio::test]
    async fn editing_clears_simulation_and_ready_transaction_together() {
        for field in Field::ALL {
            let mut flow = filled_flow(FakeChain::succeeding(), FakeWallet::connected());
            flow.simulate().await;
            assert!(flow.simulation().is_some() && flow.ready_transaction().is_some());

            assert!(flow.push_char(field, '0'));
            assert!(flow.simulation().is_none());
            assert!(flow.ready_transaction().is_none());
            assert!(!flow.can_execute());
        }

        let mut flow = filled_flow(FakeChain::succeeding(), FakeWallet::connected());
        flow.simulate().await;
        flow.pop_char(Field::RecipientAddress);
        assert_eq!(flow.phase(), &Phase::Idle);
        assert!(flow.simulation().is_none());
    }

    #[tokio::test]
    async fn simulating_twice_matches_simulating_once() {
        let mut once = filled_flow(FakeChain::succeeding(), FakeWallet::connected());
        let first = once.simulate().await;

        let mut twice = filled_flow(FakeChain::succeeding(), FakeWallet::connected());
        twice.simulate().await;
        let second = twice.simulate().await;

        assert_eq!(first, second);
        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.simulation(), twice.simulation());
        assert_eq!(once.request(), twice.request());
    }

    #[tokio::test]
    async fn scenario_a_success_path_and_mint() {
        let chain = FakeChain::succeeding();
        let wallet = FakeWallet::connected();
        let mut flow = filled_flow(chain.clone(), wallet.clone());

        assert!(matches!(flow.simulate().await, Notice::Success(_)));
        assert!(flow.can_execute());

        let notice = flow.execute().await;
        assert!(matches!(notice, Notice::Success(ref text) if text.starts_with("NFT minted successfully!")));
        assert_eq!(wallet.submissions(), 1);

        // execute builds its own call, aimed at the form recipient
        let executed = chain.last_built().unwrap();
        assert_eq!(executed.recipient, "0xdef");
        assert_eq!(executed.image_url, FlowOptions::default().image_url);

        assert_eq!(flow.request(), &MintRequest::default());
        assert!(flow.simulation().is_none());
        assert!(flow.ready_transaction().is_none());
    }

    #[tokio::test]
    async fn scenario_c_execute_without_simulation_is_blocked() {
        let wallet = FakeWallet::connected();
        let mut flow = filled_flow(FakeChain::succeeding(), wallet.clone());

        let notice = flow.execute().await;
        assert_eq!(notice, Notice::Prompt(ValidationError::NotSimulated.to_string()));
        assert!(notice.text().contains("simulate"));
        assert_eq!(wallet.submissions(), 0);
    }

    #[tokio::test]
    async fn scenario_d_rejected_signature_keeps_the_form() {
        let wallet = FakeWallet::connected();
        let mut flow = filled_flow(FakeChain::succeeding(), wallet.clone());
        flow.simulate().await;

        wallet.fail_with(SubmitError::UserRejected("declined".to_string()));
        let notice = flow.execute().await;

        assert!(matches!(notice, Notice::Error(ref text) if text.starts_with("Minting failed")));
        assert!(!flow.is_pending());
        assert_eq!(flow.request().package_id, "0xabc");
        assert_eq!(flow.request().recipient_address, "0xdef");
        // still simulated, so the user can retry straight away
        assert!(flow.can_execute());
        assert_eq!(wallet.submissions(), 1);
    }

    #[tokio::test]
    async fn pending_operation_locks_the_form() {
        let mut flow = filled_flow(FakeChain::succeeding(), FakeWallet::connected());
        let pending = flow.begin_simulate().unwrap();
        assert!(flow.is_pending());
        assert!(!flow.can_simulate());

        assert!(!flow.push_char(Field::PackageId, 'f'));
        assert!(!flow.set_field(Field::RecipientAddress, "0x1"));
        assert!(!flow.disconnect_wallet());
        assert!(matches!(flow.begin_simulate(), Err(Notice::Info(_))));
        assert!(matches!(flow.begin_execute(), Err(Notice::Info(_))));
        assert_eq!(flow.request().package_id, "0xabc");

        let outcome = pending.run().await;
        assert!(matches!(flow.complete_simulate(outcome), Notice::Success(_)));
        assert!(!flow.is_pending());
    }

    #[tokio::test]
    async fn build_failure_surfaces_as_simulation_error() {
        let chain = FakeChain::succeeding();
        let mut flow = MintFlow::new(chain, FakeWallet::connected(), FlowOptions::default());
        flow.set_field(Field::PackageId, "not-a-package");
        flow.set_field(Field::RecipientAddress, "0xdef");

        let notice = flow.simulate().await;
        assert!(matches!(notice, Notice::Error(ref text) if text.contains("Invalid package ID")));
        assert_eq!(flow.phase(), &Phase::Idle);
    }

    #[tokio::test]
    async fn new_backends_drop_the_simulation_but_keep_the_form() {
        let mut flow = filled_flow(FakeChain::succeeding(), FakeWallet::connected());
        flow.simulate().await;
        assert!(flow.can_execute());

        assert!(flow.replace_backends(FakeChain::succeeding(), FakeWallet::connected()));
        assert!(flow.simulation().is_none());
        assert_eq!(flow.phase(), &Phase::Idle);
        assert_eq!(flow.request().package_id, "0xabc");

        let pending = flow.begin_simulate().unwrap();
        assert!(!flow.replace_backends(FakeChain::succeeding(), FakeWallet::connected()));
        drop(pending);
    }

    #[tokio::test]
    async fn disconnecting_drops_the_simulation() {
        let wallet = FakeWallet::connected();
        let mut flow = filled_flow(FakeChain::succeeding(), wallet);
        flow.simulate().await;

        assert!(flow.disconnect_wallet());
        assert!(flow.account().is_none());
        assert!(flow.ready_transaction().is_none());
        assert!(!flow.can_execute());
    }
}
