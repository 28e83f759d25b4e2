//! Terminal status lines for the dev server.
//!
//! Log records go through `tracing`; these helpers are for the handful of
//! human-facing lines printed around startup and shutdown. Everything goes to
//! stderr so stdout stays free for piping.

use owo_colors::OwoColorize;
use std::path::Path;

/// Server is up, or stopped cleanly.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Neutral status line (served directory, shutdown notice).
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Degraded but still serving, e.g. no Ctrl+C handler.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Server is going down because of an error.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print the startup banner once the listener is bound.
///
/// ```no_run
/// use std::path::Path;
///
/// hotdev::ui::server_banner("http://localhost:8080/", Path::new("/srv/site/public"));
/// ```
pub fn server_banner(url: &str, root: &Path) {
    success(&format!("Server listening on {}", url));
    info(&format!("Serving {}", root.display()));
    info("Press Ctrl+C to stop");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_and_status_lines() {
        server_banner("http://localhost:8080/", Path::new("public"));
        warning("Ctrl+C handler unavailable");
        error("Development server stopped with an error");
    }
}
