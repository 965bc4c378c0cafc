use sui_sdk::types::base_types::ObjectID;
use crate::transactions::MintCall;

/// Editable form fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PackageId,
    RecipientAddress,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::PackageId, Field::RecipientAddress];

    pub fn next(self) -> Self {
        match self {
            Field::PackageId => Field::RecipientAddress,
            Field::RecipientAddress => Field::PackageId,
        }
    }

    pub fn previous(self) -> Self {
        // two fields: previous and next coincide
        self.next()
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::PackageId => "PACKAGE ID",
            Field::RecipientAddress => "RECIPIENT ADDRESS",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::PackageId => "Deployed Sui package ID (e.g., 0x...)",
            Field::RecipientAddress => "Recipient's Sui address (e.g., 0x...)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintRequest {
    pub package_id: String,
    pub recipient_address: String,
}

impl MintRequest {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::PackageId => &self.package_id,
            Field::RecipientAddress => &self.recipient_address,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::PackageId => &mut self.package_id,
            Field::RecipientAddress => &mut self.recipient_address,
        }
    }

    /// Both fields non-empty after trimming
    pub fn is_complete(&self) -> bool {
        !self.package_id.trim().is_empty() && !self.recipient_address.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.package_id.clear();
        self.recipient_address.clear();
    }
}

/// Gas figures of a dry-run, in MIST, as reported by the node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasUsage {
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
}

impl GasUsage {
    pub fn net_cost(&self) -> i128 {
        self.computation_cost as i128 + self.storage_cost as i128 - self.storage_rebate as i128
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationEffects {
    pub gas: GasUsage,
    pub status: String,
    pub created: Vec<ObjectID>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationResult {
    Failed { message: String },
    Succeeded(SimulationEffects),
}

impl SimulationResult {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SimulationResult::Failed { message } => Some(message),
            SimulationResult::Succeeded(_) => None,
        }
    }
}

/// Where the mint flow stands. `Simulated` and `Executing` carry the call
/// that passed the dry-run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Simulating,
    Simulated(MintCall),
    Executing(MintCall),
}

impl Phase {
    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Simulating | Phase::Executing(_))
    }

    pub fn ready_transaction(&self) -> Option<&MintCall> {
        match self {
            Phase::Simulated(call) | Phase::Executing(call) => Some(call),
            Phase::Idle | Phase::Simulating => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Simulating => "SIMULATING",
            Phase::Simulated(_) => "READY TO MINT",
            Phase::Executing(_) => "MINTING",
        }
    }
}
