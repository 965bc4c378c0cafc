use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use sui_sdk::{
    rpc_types::{
        SuiExecutionStatus,
        SuiObjectRef,
        SuiTransactionBlockEffects,
        SuiTransactionBlockEffectsAPI,
    },
    types::{
        base_types::SuiAddress,
        programmable_transaction_builder::ProgrammableTransactionBuilder,
        transaction::{
            ProgrammableTransaction,
            TransactionData,
        },
        Identifier,
    },
    SuiClient,
};
use sui_types::transaction::{
    Argument,
    CallArg,
    Command,
};
use tracing::debug;
use crate::{
    constants::{
        MINT_FUNCTION,
        MINT_MODULE,
    },
    flow::{GasUsage, SimulationEffects, SimulationResult},
    utils::{parse_address, parse_object_id},
};

/// Unsigned description of one `loyalty_card::mint_loyalty` call.
///
/// Fields are kept as typed by the user; they are parsed only when the call
/// is turned into a programmable transaction, so a bad package ID or address
/// surfaces as a build error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCall {
    pub package_id: String,
    pub recipient: String,
    pub image_url: String,
}

impl MintCall {
    pub fn new(package_id: &str, recipient: &str, image_url: &str) -> Self {
        Self {
            package_id: package_id.trim().to_string(),
            recipient: recipient.trim().to_string(),
            image_url: image_url.to_string(),
        }
    }

    /// `package::module::function`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package_id, MINT_MODULE, MINT_FUNCTION)
    }

    /// Pure inputs in call order: `recipient: address`, `image_url: String`
    pub fn call_args(&self) -> Result<Vec<CallArg>> {
        let recipient = parse_address(&self.recipient)?;
        Ok(vec![
            CallArg::Pure(bcs::to_bytes(&recipient)?),
            CallArg::Pure(bcs::to_bytes(&self.image_url)?),
        ])
    }

    pub fn programmable(&self) -> Result<ProgrammableTransaction> {
        let package_id = parse_object_id(&self.package_id)
            .map_err(|e| anyhow!("Invalid package ID: {}", e))?;

        let mut ptb = ProgrammableTransactionBuilder::new();
        let arguments = self.call_args()?
            .into_iter()
            .map(|arg| ptb.input(arg))
            .collect::<Result<Vec<Argument>>>()?;

        ptb.command(Command::move_call(
            package_id,
            Identifier::new(MINT_MODULE)?,
            Identifier::new(MINT_FUNCTION)?,
            vec![],
            arguments,
        ));

        Ok(ptb.finish())
    }
}

/// Gas configuration for transactions
#[derive(Debug, Clone, Copy)]
pub struct GasConfig {
    pub budget: u64,
    pub price: Option<u64>,
}

/// Builds, simulates and reads state for mint calls
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn build(&self, call: &MintCall, sender: SuiAddress) -> Result<TransactionData>;

    /// Dry-run against current chain state; nothing is committed
    async fn dry_run(&self, tx: TransactionData) -> Result<SimulationResult>;

    async fn balance(&self, owner: SuiAddress) -> Result<u128>;
}

pub struct SuiChainClient {
    sui_client: Arc<SuiClient>,
    gas_config: GasConfig,
}

impl SuiChainClient {
    pub fn new(sui_client: Arc<SuiClient>, gas_config: GasConfig) -> Self {
        Self {
            sui_client,
            gas_config,
        }
    }

    /// Get a gas coin for transaction
    async fn get_gas_coin(&self, sender: SuiAddress) -> Result<SuiObjectRef> {
        let coins = self.sui_client
            .coin_read_api()
            .get_coins(sender, None, None, None)
            .await?;

        coins.data.into_iter().next()
            .map(|coin| SuiObjectRef {
                object_id: coin.coin_object_id,
                version: coin.version,
                digest: coin.digest
            })
            .ok_or_else(|| anyhow!("No available coins found for {}", sender))
    }
}

#[async_trait]
impl ChainClient for SuiChainClient {
    async fn build(&self, call: &MintCall, sender: SuiAddress) -> Result<TransactionData> {
        let programmable = call.programmable()?;
        let gas_coin = self.get_gas_coin(sender).await?;

        let gas_price = match self.gas_config.price {
            Some(price) => price,
            None => self.sui_client.read_api().get_reference_gas_price().await?,
        };

        debug!(move_call = %call.target(), %sender, gas_price, budget = self.gas_config.budget, "built mint transaction");

        Ok(TransactionData::new_programmable(
            sender,
            vec![(gas_coin.object_id, gas_coin.version, gas_coin.digest)],
            programmable,
            self.gas_config.budget,
            gas_price,
        ))
    }

    async fn dry_run(&self, tx: TransactionData) -> Result<SimulationResult> {
        let response = self.sui_client
            .read_api()
            .dry_run_transaction_block(tx)
            .await?;

        Ok(simulation_from_effects(&response.effects))
    }

    async fn balance(&self, owner: SuiAddress) -> Result<u128> {
        let balance = self.sui_client
            .coin_read_api()
            .get_balance(owner, None)
            .await?;
        Ok(balance.total_balance)
    }
}

pub fn simulation_from_effects(effects: &SuiTransactionBlockEffects) -> SimulationResult {
    let summary = effects.gas_cost_summary();
    let gas = GasUsage {
        computation_cost: summary.computation_cost,
        storage_cost: summary.storage_cost,
        storage_rebate: summary.storage_rebate,
    };
    let created = effects.created()
        .iter()
        .map(|object| object.reference.object_id)
        .collect();

    simulation_from_status(effects.status(), gas, created)
}

pub fn simulation_from_status(
    status: &SuiExecutionStatus,
    gas: GasUsage,
    created: Vec<sui_sdk::types::base_types::ObjectID>,
) -> SimulationResult {
    match status {
        SuiExecutionStatus::Success => SimulationResult::Succeeded(SimulationEffects {
            gas,
            status: "success".to_string(),
            created,
        }),
        SuiExecutionStatus::Failure { error } => SimulationResult::Failed {
            message: error.clone(),
        },
    }
}
