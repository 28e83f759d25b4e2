//! hotdev - static file development server with live reload.
//!
//! Serves a directory over HTTP and reloads connected browsers when a file
//! under it changes. HTML responses get a small client script injected that
//! listens on a Server-Sent Events stream.
//!
//! # Architecture
//!
//! - [`dev`] - the live-reload pipeline: watcher, debouncer, event bus,
//!   SSE endpoint, path resolver and static responder
//! - [`config`] - `ServerConfig` loading from CLI, environment and file
//! - [`cli`] - command-line definition
//! - [`commands`] - the `serve` orchestration
//! - [`error`] - error types
//! - [`logger`] - `tracing` setup
//! - [`ui`] - terminal status lines
//!
//! # Example
//!
//! ```rust,no_run
//! use hotdev::config::ServerConfig;
//! use hotdev::dev::{DevServer, EventBus, FileWatcher};
//! use std::sync::Arc;
//!
//! # async fn run() -> hotdev::Result<()> {
//! let mut config = ServerConfig::default();
//! config.validate()?;
//!
//! let bus = Arc::new(EventBus::new());
//! let _watcher = FileWatcher::spawn(config.root.clone(), config.ignore_list(), bus.clone())?;
//! let server = DevServer::new(config, bus);
//! let listener = server.bind().await?;
//! server.serve(listener).await
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{ConfigError, DevError, Result, ResultExt};
