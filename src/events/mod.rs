mod handler;
mod runner;
mod types;

pub use handler::{handle_event, handle_key};
pub use runner::CommandRunner;
pub use types::{AppEvent, Command, EventResult};
