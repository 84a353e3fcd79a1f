use std::time::Duration;

use ratatui::style::{Modifier, Style};
use tokio_util::sync::CancellationToken;

use crate::events::Command;
use crate::ui::theme::{COLOR_GOOD, COLOR_HOT};

pub const DEFAULT_STATUS_LIFETIME: Duration = Duration::from_secs(15);

pub struct StatusMessage {
    pub id: u64,
    pub level: StatusLevel,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

impl StatusLevel {
    pub fn style(self) -> Style {
        match self {
            StatusLevel::Success => Style::default().fg(COLOR_GOOD).add_modifier(Modifier::BOLD),
            StatusLevel::Error => Style::default().fg(COLOR_HOT).add_modifier(Modifier::BOLD),
        }
    }
}

/// Holds at most one transient message.
///
/// Every post hands out a fresh cancellation token with its expiry command and
/// cancels the token of the message it replaces, so only the newest message
/// ever gets an expiry delivered.
pub struct StatusNotifier {
    current: Option<StatusMessage>,
    pending: Option<CancellationToken>,
    lifetime: Duration,
    next_id: u64,
}

impl StatusNotifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            pending: None,
            lifetime,
            next_id: 0,
        }
    }

    pub fn post(&mut self, level: StatusLevel, text: impl Into<String>) -> Command {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        self.next_id += 1;
        let id = self.next_id;
        let cancel = CancellationToken::new();
        self.current = Some(StatusMessage {
            id,
            level,
            text: text.into(),
        });
        self.pending = Some(cancel.clone());
        Command::ExpireStatus {
            id,
            after: self.lifetime,
            cancel,
        }
    }

    /// Returns whether a message was actually cleared.
    pub fn on_expire(&mut self, id: u64) -> bool {
        match self.current.as_ref() {
            Some(message) if message.id == id => {
                self.current = None;
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_LIFETIME)
    }
}
