//! Application state for the web layer.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::network::MetroNetwork;

/// Shared application state.
///
/// The network (graph plus ticket log) sits behind one coarse mutex: BFS
/// reads and ticket-log appends are not safe to interleave, and every
/// operation is short and CPU-bound, so a single lock around each call is
/// all the coordination the handlers need.
#[derive(Clone)]
pub struct AppState {
    network: Arc<Mutex<MetroNetwork>>,

    /// Where to persist the snapshot after each purchase, if anywhere.
    pub data_path: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Create app state around a loaded network.
    pub fn new(network: MetroNetwork, data_path: Option<PathBuf>) -> Self {
        Self {
            network: Arc::new(Mutex::new(network)),
            data_path: data_path.map(Arc::new),
        }
    }

    /// Lock the network for one operation.
    ///
    /// A poisoned lock still yields the guard: the network's operations
    /// never leave it in a torn state.
    pub fn network(&self) -> MutexGuard<'_, MetroNetwork> {
        self.network.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
