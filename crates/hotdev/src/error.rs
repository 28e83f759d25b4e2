//! Error handling for the hotdev server.
//!
//! `DevError` is the top-level type returned by commands and long-running
//! tasks. `ConfigError` carries startup configuration failures with a hint for
//! the user. Missing or unreachable files are not errors here: the static
//! responder turns them into a plain 404 response.
//!
//! # Example
//!
//! ```rust,no_run
//! use hotdev::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_index(root: &Path) -> Result<String> {
//!     let path = root.join("index.html");
//!     std::fs::read_to_string(&path).with_path(&path)
//! }
//! ```

use miette::Report;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum DevError {
    /// Startup configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Watched directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// I/O errors from file system or socket operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP listener errors (bind, accept)
    #[error("Server error: {0}")]
    Server(String),

    /// The underlying watch primitive failed
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// The watch task ended abnormally (panic or runtime shutdown)
    #[error("Watch task failed: {0}")]
    WatchTask(String),
}

/// Configuration errors raised while resolving `ServerConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Web root is missing or not a directory
    #[error("Root directory not found: {}\n\nHint: Pass an existing directory as ROOT or create it first", .0.display())]
    RootNotFound(PathBuf),

    /// Explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `DevError` as the default error type.
pub type Result<T, E = DevError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a `NotFound` I/O error into `DevError::DirectoryNotFound` for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<DevError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            DevError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                DevError::DirectoryNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

/// Convert a `DevError` into a miette report for the process exit path.
pub fn to_miette(err: DevError) -> Report {
    match err {
        DevError::Config(e) => miette::miette!(
            help = "Run `hotdev --help` for the available options",
            "{}",
            e
        ),
        DevError::Watch(e) => miette::miette!("Live reload stopped: {}", e),
        other => miette::miette!("{}", other),
    }
}
