use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use contactbook_core::ServiceTraitBounds;
use log::{debug, trace};
#[cfg(test)]
use mockall::automock;
use tokio_with_wasm::alias as tokio;

use crate::state::ContactState;

#[cfg(test)]
impl ServiceTraitBounds for MockSearchServiceApi {}

/// Debounced free-text search over the contacts
#[cfg_attr(test, automock)]
pub trait SearchServiceApi: ServiceTraitBounds {
    /// Schedules filtering the contacts by the given query. A later call within the debounce
    /// window replaces the scheduled one, so only the last query of a burst is applied.
    fn search(&self, query: &str);

    /// Drops the scheduled search, if there is one
    fn cancel(&self);
}

/// Runs the filter on the local task set once the query stayed the same for the debounce window.
/// The filter reads the contacts at the time it fires, not when the search was scheduled.
pub struct SearchService {
    state: ContactState,
    debounce: Duration,
    pending: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl ServiceTraitBounds for SearchService {}

impl SearchService {
    pub fn new(state: ContactState, debounce: Duration) -> Self {
        Self {
            state,
            debounce,
            pending: Mutex::new(None),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<tokio::task::JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SearchServiceApi for SearchService {
    fn search(&self, query: &str) {
        let state = self.state.clone();
        let debounce = self.debounce;
        let query = query.to_owned();
        let mut pending = self.pending();
        if let Some(previous) = pending.take() {
            trace!("Superseding scheduled search");
            previous.abort();
        }
        *pending = Some(tokio::task::spawn_local(async move {
            tokio::time::sleep(debounce).await;
            debug!("Filtering contacts by query '{query}'");
            state.apply_filter(&query);
        }));
    }

    fn cancel(&self) {
        if let Some(handle) = self.pending().take() {
            debug!("Cancelling scheduled search");
            handle.abort();
        }
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        self.cancel();
    }
}
