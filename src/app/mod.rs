// module declaration
pub mod core;
pub mod input;
pub mod network;
pub mod operations;
pub mod ui_state;

// export App and related types
pub use self::core::{App, MessageType};
pub use input::Action;
