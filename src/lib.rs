pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod ui;
pub mod utils;

pub use error::{Result, WatcherError};
