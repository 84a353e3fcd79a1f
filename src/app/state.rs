use std::time::SystemTime;

use ratatui::prelude::Rect;
use tracing::{debug, info, warn};

use super::config::Config;
use super::status::{StatusLevel, StatusNotifier};
use super::table::ProcessTable;
use crate::data::Process;
use crate::events::Command;

/// Rows taken by everything around the table body: header, search bar,
/// table border and column header, footer.
const CHROME_ROWS: u16 = 14;

/// Whole application state. Only the event loop mutates it; background
/// work reports back through events and never touches it directly.
pub struct App {
    pub table: ProcessTable,
    pub status: StatusNotifier,
    pub username: String,
    pub endpoint: String,
    pub viewport: (u16, u16),
    pub process_body: Option<Rect>,
    rearm_on_error: bool,
    poll_epoch: u64,
    commands: Vec<Command>,
}

impl App {
    pub fn new(config: &Config, username: impl Into<String>) -> Self {
        Self {
            table: ProcessTable::new(config.poll_interval),
            status: StatusNotifier::new(config.status_lifetime),
            username: username.into(),
            endpoint: config.server.clone(),
            viewport: (0, 0),
            process_body: None,
            rearm_on_error: config.rearm_on_error,
            poll_epoch: 0,
            commands: Vec::new(),
        }
    }

    /// Kick off the first, undelayed fetch.
    pub fn start(&mut self) {
        self.start_poll_chain();
    }

    /// Drain the commands queued by the last handled events.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Rows one PageUp/PageDown jumps.
    pub fn page_rows(&self) -> usize {
        self.process_body
            .map(|rect| rect.height)
            .unwrap_or_else(|| self.viewport.1.saturating_sub(CHROME_ROWS))
            .max(1) as usize
    }

    pub fn apply_processes(&mut self, epoch: u64, processes: Vec<Process>, now: SystemTime) {
        if epoch != self.poll_epoch {
            debug!(epoch, current = self.poll_epoch, "dropping result of superseded poll chain");
            return;
        }
        debug!(count = processes.len(), "process list refreshed");
        self.table.apply_fetch_result(processes, now);
        self.arm_next_fetch();
    }

    pub fn fetch_failed(&mut self, epoch: u64, error: String) {
        if epoch != self.poll_epoch {
            debug!(epoch, current = self.poll_epoch, "dropping failure of superseded poll chain");
            return;
        }
        warn!(%error, "fetching processes failed");
        self.post_status(StatusLevel::Error, error);
        if self.rearm_on_error {
            self.arm_next_fetch();
        }
    }

    /// Ask the server to kill the highlighted process; silent when nothing
    /// is highlighted.
    pub fn kill_selected(&mut self) {
        let Some(row) = self.table.highlighted() else {
            return;
        };
        info!(id = %row.id, kind = %row.kind, "killing process");
        let command = Command::KillProcess {
            id: row.id.clone(),
            kind: row.kind.clone(),
        };
        self.commands.push(command);
    }

    pub fn process_killed(&mut self, id: &str, kind: &str) {
        self.post_status(
            StatusLevel::Success,
            format!("Successfully killed {kind} process with ID: {id}"),
        );
        self.start_poll_chain();
    }

    pub fn kill_failed(&mut self, id: &str, error: &str) {
        warn!(%id, %error, "kill failed");
        self.post_status(
            StatusLevel::Error,
            format!("Unable to kill process: {error}"),
        );
    }

    pub fn expire_status(&mut self, id: u64) {
        self.status.on_expire(id);
    }

    pub fn post_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        let command = self.status.post(level, text);
        self.commands.push(command);
    }

    /// Start a fresh poll chain; results of older chains are ignored from now on.
    fn start_poll_chain(&mut self) {
        self.poll_epoch += 1;
        self.commands.push(Command::FetchProcesses {
            epoch: self.poll_epoch,
            delay: None,
        });
    }

    fn arm_next_fetch(&mut self) {
        self.commands.push(Command::FetchProcesses {
            epoch: self.poll_epoch,
            delay: Some(self.table.interval().as_duration()),
        });
    }
}
