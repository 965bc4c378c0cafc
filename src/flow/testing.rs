//! In-memory chain and wallet used by the flow and app tests.

use std::sync::Arc;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use sui_sdk::types::{
    base_types::{ObjectDigest, ObjectID, SequenceNumber, SuiAddress},
    transaction::TransactionData,
};
use crate::{
    constants::GAS_BUDGET,
    error::SubmitError,
    flow::{GasUsage, SimulationEffects, SimulationResult},
    transactions::{ChainClient, MintCall},
    utils::parse_address,
    wallet::{Receipt, WalletConnector},
};

pub fn test_account() -> SuiAddress {
    parse_address("0x5157").unwrap()
}

pub fn success_effects() -> SimulationResult {
    SimulationResult::Succeeded(SimulationEffects {
        gas: GasUsage {
            computation_cost: 1_000_000,
            storage_cost: 2_964_000,
            storage_rebate: 978_120,
        },
        status: "success".to_string(),
        created: vec![ObjectID::from_hex_literal("0xc4d").unwrap()],
    })
}

enum DryRunReply {
    Result(SimulationResult),
    Error(String),
    Panic,
}

pub struct FakeChain {
    reply: Mutex<DryRunReply>,
    balance_error: Mutex<Option<String>>,
    pub built: Mutex<Vec<MintCall>>,
    pub dry_runs: Mutex<usize>,
}

impl FakeChain {
    pub fn succeeding() -> Arc<Self> {
        Self::replying(success_effects())
    }

    pub fn replying(result: SimulationResult) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(DryRunReply::Result(result)),
            balance_error: Mutex::new(None),
            built: Mutex::new(Vec::new()),
            dry_runs: Mutex::new(0),
        })
    }

    pub fn erroring(message: &str) -> Arc<Self> {
        let chain = Self::succeeding();
        *chain.reply.lock() = DryRunReply::Error(message.to_string());
        chain
    }

    pub fn panicking() -> Arc<Self> {
        let chain = Self::succeeding();
        *chain.reply.lock() = DryRunReply::Panic;
        chain
    }

    pub fn fail_balance(&self, message: &str) {
        *self.balance_error.lock() = Some(message.to_string());
    }

    pub fn last_built(&self) -> Option<MintCall> {
        self.built.lock().last().cloned()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn build(&self, call: &MintCall, sender: SuiAddress) -> Result<TransactionData> {
        self.built.lock().push(call.clone());
        let programmable = call.programmable()?;
        Ok(TransactionData::new_programmable(
            sender,
            vec![(ObjectID::from_hex_literal("0x9a5")?, SequenceNumber::new(), ObjectDigest::random())],
            programmable,
            GAS_BUDGET,
            1_000,
        ))
    }

    async fn dry_run(&self, _tx: TransactionData) -> Result<SimulationResult> {
        *self.dry_runs.lock() += 1;
        match &*self.reply.lock() {
            DryRunReply::Result(result) => Ok(result.clone()),
            DryRunReply::Error(message) => Err(anyhow!(message.clone())),
            DryRunReply::Panic => panic!("dry-run blew up"),
        }
    }

    async fn balance(&self, _owner: SuiAddress) -> Result<u128> {
        match &*self.balance_error.lock() {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(2_500_000_000),
        }
    }
}

pub struct FakeWallet {
    account: Mutex<Option<SuiAddress>>,
    reply: Mutex<Result<Receipt, SubmitError>>,
    panics: Mutex<bool>,
    pub submitted: Mutex<Vec<TransactionData>>,
}

impl FakeWallet {
    pub fn connected() -> Arc<Self> {
        let wallet = Self::disconnected();
        *wallet.account.lock() = Some(test_account());
        wallet
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(Self {
            account: Mutex::new(None),
            reply: Mutex::new(Ok(Receipt {
                digest: "8qJfvXqNnAzo2RHc3HBYzb5cdDqYRUwhEJhnE8GRWR9Q".to_string(),
            })),
            panics: Mutex::new(false),
            submitted: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_with(&self, error: SubmitError) {
        *self.reply.lock() = Err(error);
    }

    pub fn panic_on_submit(&self) {
        *self.panics.lock() = true;
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().len()
    }
}

#[async_trait]
impl WalletConnector for FakeWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        *self.account.lock()
    }

    fn connect(&self) -> Result<SuiAddress> {
        let address = test_account();
        *self.account.lock() = Some(address);
        Ok(address)
    }

    fn disconnect(&self) {
        *self.account.lock() = None;
    }

    async fn sign_and_submit(&self, tx: TransactionData) -> Result<Receipt, SubmitError> {
        self.submitted.lock().push(tx);
        if *self.panics.lock() {
            panic!("wallet blew up");
        }
        self.reply.lock().clone()
    }
}
