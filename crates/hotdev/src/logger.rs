//! Logging setup built on `tracing`.
//!
//! The dev server logs one line per completed HTTP response, one line when the
//! watcher starts and one line per accepted file change. Verbosity is chosen
//! from the command-line flags, then `RUST_LOG`, then the `info` default.
//!
//! ```rust,no_run
//! use hotdev::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("[watch]\tWatching {}", "public");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "hotdev=debug";
const QUIET_FILTER: &str = "hotdev=error";
const DEFAULT_FILTER: &str = "hotdev=info";

/// Initialize the global tracing subscriber.
///
/// Must be called once, before any logging occurs.
///
/// * `verbose` - debug level for hotdev (overrides `quiet`)
/// * `quiet` - errors only
/// * `no_color` - disable ANSI colors
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise the terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
