use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::types::{AppEvent, Command};
use crate::data::ProcessApi;

/// Executes model commands on tokio tasks and posts their outcome back into
/// the loop's inbox. Nothing here touches `App`.
#[derive(Clone)]
pub struct CommandRunner {
    api: Arc<dyn ProcessApi>,
    inbox: UnboundedSender<AppEvent>,
}

impl CommandRunner {
    pub fn new(api: Arc<dyn ProcessApi>, inbox: UnboundedSender<AppEvent>) -> Self {
        Self { api, inbox }
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let inbox = self.inbox.clone();
        match command {
            Command::FetchProcesses { epoch, delay } => tokio::spawn(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                debug!(epoch, "fetching processes");
                let event = match api.list_processes().await {
                    Ok(processes) => AppEvent::ProcessesLoaded { epoch, processes },
                    Err(err) => AppEvent::FetchFailed {
                        epoch,
                        error: err.to_string(),
                    },
                };
                deliver(&inbox, event);
            }),
            Command::KillProcess { id, kind } => tokio::spawn(async move {
                let event = match api.kill_process(&id).await {
                    Ok(()) => {
                        info!(%id, %kind, "process killed");
                        AppEvent::ProcessKilled { id, kind }
                    }
                    Err(err) => AppEvent::KillFailed {
                        id,
                        error: err.to_string(),
                    },
                };
                deliver(&inbox, event);
            }),
            Command::ExpireStatus { id, after, cancel } => tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(after) => {
                        deliver(&inbox, AppEvent::StatusExpired(id));
                    }
                }
            }),
        }
    }
}

/// The loop may already be gone on quit; outcomes are simply dropped then.
fn deliver(inbox: &UnboundedSender<AppEvent>, event: AppEvent) {
    if inbox.send(event).is_err() {
        warn!("event loop closed; dropping command outcome");
    }
}
