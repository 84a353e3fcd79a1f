use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio_util::sync::CancellationToken;

use crate::data::Process;

/// Everything the loop reacts to, from the terminal or from finished commands.
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// A fetch issued by poll chain `epoch` returned a list
    ProcessesLoaded { epoch: u64, processes: Vec<Process> },
    /// A fetch issued by poll chain `epoch` failed
    FetchFailed { epoch: u64, error: String },
    /// Kill request acknowledged by the server
    ProcessKilled { id: String, kind: String },
    /// Kill request failed
    KillFailed { id: String, error: String },
    /// Lifetime of status message `id` ran out
    StatusExpired(u64),
    /// Request to quit
    Quit,
}

/// Side effects requested by the model, executed off the render path.
#[derive(Debug, Clone)]
pub enum Command {
    /// Optionally sleep, then list processes
    FetchProcesses {
        epoch: u64,
        delay: Option<Duration>,
    },
    /// Kill one process by id
    KillProcess { id: String, kind: String },
    /// Deliver `StatusExpired(id)` after `after` unless `cancel` fires first
    ExpireStatus {
        id: u64,
        after: Duration,
        cancel: CancellationToken,
    },
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running
    Continue,
    /// Exit the application
    Exit,
}

impl EventResult {
    pub fn should_exit(self) -> bool {
        matches!(self, EventResult::Exit)
    }
}
