use thiserror::Error;

/// Input problems caught before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please connect your wallet to mint an NFT.")]
    WalletNotConnected,
    #[error("Please fill in all required fields (Package ID, Recipient Address).")]
    MissingFields,
    #[error("Please simulate the transaction before minting.")]
    NotSimulated,
}

/// Failures reported by a wallet's sign-and-submit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("request rejected by wallet: {0}")]
    UserRejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("transaction failed on chain: {0}")]
    Chain(String),
}
