mod api;
mod client;
mod process;

pub use api::{ApiFuture, ProcessApi};
pub use client::{Auth, StardogClient};
pub use process::{Process, ProcessRow, ProcessStatus, Progress, RowEmphasis};
