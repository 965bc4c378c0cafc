use crate::app::core::App;
use crate::flow::Phase;
use std::time::{SystemTime, UNIX_EPOCH};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

impl App {
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    /// One-line status for the phase, animated while a call is in flight
    pub fn get_phase_animation(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let frame = SPINNER[(millis / 250 % SPINNER.len() as u128) as usize];

        let phase = self.flow.phase();
        match phase {
            Phase::Idle | Phase::Simulated(_) => {
                let marker = if phase.ready_transaction().is_some() { "●" } else { "○" };
                format!("{} {}", marker, phase.label())
            }
            Phase::Simulating => format!("{} {}...", frame, phase.label()),
            Phase::Executing(_) => format!("{} {}... confirm in wallet", frame, phase.label()),
        }
    }
}
