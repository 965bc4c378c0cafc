use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::app::core::{App, MessageType};

/// Work the event loop has to start after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Simulate,
    Execute,
    ToggleWallet,
    SwitchNetwork,
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // an open prompt swallows the key that dismisses it
        if self.prompt.is_some() {
            self.prompt = None;
            return Action::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.quit(),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.previous_field();
                Action::None
            }
            KeyCode::Enter | KeyCode::F(5) => Action::Simulate,
            KeyCode::F(6) => Action::Execute,
            KeyCode::F(2) => Action::ToggleWallet,
            KeyCode::F(3) => {
                if self.is_switching_network {
                    Action::None
                } else {
                    Action::SwitchNetwork
                }
            }
            KeyCode::Backspace => {
                if !self.flow.pop_char(self.focus) {
                    self.report_locked();
                }
                Action::None
            }
            KeyCode::Char(c) => {
                if !self.flow.push_char(self.focus, c) {
                    self.report_locked();
                }
                Action::None
            }
            _ => {
                self.clear_message();
                Action::None
            }
        }
    }

    // a dispatched call cannot be cancelled, and leaving would drop its task
    fn quit(&mut self) -> Action {
        if self.flow.is_pending() {
            self.set_message(
                MessageType::Info,
                "A transaction is in progress, wait for it to finish before quitting.".to_string(),
            );
            return Action::None;
        }
        Action::Quit
    }

    fn report_locked(&mut self) {
        self.set_message(MessageType::Info, "Inputs are locked while a transaction is pending.".to_string());
    }
}
