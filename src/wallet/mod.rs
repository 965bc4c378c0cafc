mod types;
mod client;

pub use types::Receipt;
pub use client::{KeystoreWallet, WalletConnector};
