// Basic type definitions for the wallet module

/// Proof that the wallet submitted a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub digest: String,
}
