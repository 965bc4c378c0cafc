// Mint flow: form state plus the simulate-then-execute state machine

mod controller;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use controller::{FlowOptions, MintFlow, Notice, PendingExecution, PendingSimulation, SimulationOutcome};
pub use state::{Field, GasUsage, MintRequest, Phase, SimulationEffects, SimulationResult};
