//! Command implementations.
//!
//! - [`serve`] - serve the web root with live reload

pub mod serve;

pub use serve::execute as serve_execute;
