//! Live-reload development server.
//!
//! The pipeline runs one way:
//! - [`watcher`] observes the web root, drops ignored and debounced events
//! - [`bus`] fans each [`ChangeNotification`] out to every subscriber
//! - [`sse`] turns a subscription into a Server-Sent Events stream
//!
//! Static files are served independently by [`static_files`], after the
//! request path went through [`resolver`]. [`server`] is the router tying the
//! endpoints together.

pub mod bus;
pub mod debounce;
pub mod ignore;
pub mod resolver;
pub mod server;
pub mod sse;
pub mod state;
pub mod static_files;
pub mod watcher;

// Re-exports
pub use bus::{EventBus, Subscription, SubscriptionId};
pub use debounce::{Debouncer, Decision, DEBOUNCE_WINDOW};
pub use ignore::{IgnoreList, DEFAULT_IGNORES};
pub use resolver::{resolve, ResolvedPath};
pub use server::{DevServer, CLIENT_SCRIPT_PATH, EVENTS_PATH};
pub use state::{DevServerState, SharedState};
pub use watcher::{ChangeFilter, FileWatcher, RawChange};

use serde::{Deserialize, Serialize};

/// Kind of change announced to browsers.
///
/// Every accepted filesystem event is normalized to `Change`; browsers only
/// need to know that something happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Change,
}

/// A file under the web root changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    /// Always [`ChangeKind::Change`]
    pub event_type: ChangeKind,
    /// Path relative to the web root, `/`-separated
    pub filename: String,
}

impl ChangeNotification {
    /// Create a `change` notification for `filename`.
    pub fn change(filename: impl Into<String>) -> Self {
        Self {
            event_type: ChangeKind::Change,
            filename: filename.into(),
        }
    }
}
