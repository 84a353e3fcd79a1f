use std::future::Future;
use std::pin::Pin;

use super::Process;
use crate::Result;

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The two remote operations the event loop drives.
///
/// Implementations are shared read-only across every spawned command, so
/// calls must not rely on `&mut self`.
pub trait ProcessApi: Send + Sync {
    fn list_processes(&self) -> ApiFuture<'_, Vec<Process>>;

    fn kill_process<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;
}
