//! State shared by the HTTP handlers.

use crate::dev::EventBus;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read-only request state plus the event bus handle.
#[derive(Debug)]
pub struct DevServerState {
    /// Canonical web root
    root: PathBuf,
    /// Bus shared with the file watcher
    bus: Arc<EventBus>,
}

impl DevServerState {
    /// Create state for serving `root`.
    ///
    /// `root` should already be canonical; the path resolver compares
    /// against it verbatim.
    pub fn new(root: PathBuf, bus: Arc<EventBus>) -> Self {
        Self { root, bus }
    }

    /// Web root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Event bus handle.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Number of open event streams.
    pub fn client_count(&self) -> usize {
        self.bus.subscriber_count()
    }
}

/// Shared state handle for axum handlers.
pub type SharedState = Arc<DevServerState>;
