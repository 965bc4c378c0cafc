// UI module for the loyalty card minter
// This module handles all the terminal UI rendering logic

mod draw;
mod main_view;
mod simulation_display;
mod utils;

// Re-export the public functions
pub use draw::draw;
