mod config;
mod interval;
mod state;
mod status;
mod table;

pub use config::{Cli, Config};
pub use interval::{DEFAULT_POLL_SECS, MIN_POLL_SECS, PollInterval};
pub use state::App;
pub use status::{DEFAULT_STATUS_LIFETIME, StatusLevel, StatusMessage, StatusNotifier};
pub use table::ProcessTable;
