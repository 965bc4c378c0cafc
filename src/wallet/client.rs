use std::{path::{Path, PathBuf}, sync::Arc};
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::intent::Intent;
use sui_keys::keystore::{
    AccountKeystore,
    FileBasedKeystore,
};
use sui_sdk::{
    rpc_types::{
        SuiExecutionStatus,
        SuiTransactionBlockEffectsAPI,
        SuiTransactionBlockResponseOptions,
    },
    types::{
        base_types::SuiAddress,
        crypto::Signature,
        transaction::{Transaction, TransactionData},
    },
    wallet_context::WalletContext,
    SuiClient,
};
use sui_types::quorum_driver_types::ExecuteTransactionRequestType;
use tracing::{info, warn};
use crate::{
    constants::{CLIENT_CONFIG_FILE, KEYSTORE_FILE},
    error::SubmitError,
};
use super::types::Receipt;

/// The account side of the mint flow: who is connected, and signing
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn current_account(&self) -> Option<SuiAddress>;

    fn connect(&self) -> Result<SuiAddress>;

    fn disconnect(&self);

    /// Sign with the connected account and submit; the wallet pays the fee
    async fn sign_and_submit(&self, tx: TransactionData) -> Result<Receipt, SubmitError>;
}

/// Wallet backed by the Sui CLI configuration directory
/// (`client.yaml` for the active address, `sui.keystore` for keys)
pub struct KeystoreWallet {
    client: Arc<SuiClient>,
    config_dir: PathBuf,
    address: RwLock<Option<SuiAddress>>,
}

impl KeystoreWallet {
    pub fn new(client: Arc<SuiClient>, config_dir: PathBuf) -> Self {
        Self {
            client,
            config_dir,
            address: RwLock::new(None),
        }
    }
}

#[async_trait]
impl WalletConnector for KeystoreWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        *self.address.read()
    }

    fn connect(&self) -> Result<SuiAddress> {
        let config_path = self.config_dir.join(CLIENT_CONFIG_FILE);
        let mut context = WalletContext::new(&config_path)?;
        let active_address = context.active_address()?;

        *self.address.write() = Some(active_address);
        info!(address = %active_address, "wallet connected");
        Ok(active_address)
    }

    fn disconnect(&self) {
        if let Some(address) = self.address.write().take() {
            info!(%address, "wallet disconnected");
        }
    }

    async fn sign_and_submit(&self, tx_data: TransactionData) -> Result<Receipt, SubmitError> {
        let sender = self.current_account()
            .ok_or_else(|| SubmitError::UserRejected("no account connected".to_string()))?;

        let keystore_path = self.config_dir.join(KEYSTORE_FILE);
        let signature = sign_with_keystore(&keystore_path, &sender, &tx_data)?;

        let response = self.client
            .quorum_driver_api()
            .execute_transaction_block(
                Transaction::from_data(tx_data, vec![signature]),
                SuiTransactionBlockResponseOptions::full_content(),
                Some(ExecuteTransactionRequestType::WaitForLocalExecution),
            )
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if let Some(effects) = &response.effects {
            if let Err(e) = check_execution_status(effects.status()) {
                warn!(digest = %response.digest, error = %e, "transaction failed on chain");
                return Err(e);
            }
        }

        Ok(Receipt {
            digest: response.digest.base58_encode(),
        })
    }
}

/// A key that is missing or unusable is the local form of a declined signature
pub fn sign_with_keystore(
    keystore_path: &Path,
    sender: &SuiAddress,
    tx_data: &TransactionData,
) -> Result<Signature, SubmitError> {
    let keystore = FileBasedKeystore::new(&keystore_path.to_path_buf())
        .map_err(|e| SubmitError::UserRejected(format!("cannot open keystore: {}", e)))?;
    keystore
        .sign_secure(sender, tx_data, Intent::sui_transaction())
        .map_err(|e| SubmitError::UserRejected(e.to_string()))
}

pub fn check_execution_status(status: &SuiExecutionStatus) -> Result<(), SubmitError> {
    match status {
        SuiExecutionStatus::Success => Ok(()),
        SuiExecutionStatus::Failure { error } => Err(SubmitError::Chain(error.clone())),
    }
}
