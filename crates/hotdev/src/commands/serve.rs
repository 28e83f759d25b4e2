//! Serve command implementation.
//!
//! Orchestrates the dev server lifecycle:
//! - Resolve and validate configuration
//! - Start the file watcher on the web root
//! - Bind and run the HTTP server
//! - Stop on Ctrl+C, or fail when the watcher fails

use crate::cli::ServeArgs;
use crate::config::ServerConfig;
use crate::dev::{DevServer, EventBus, FileWatcher};
use crate::error::Result;
use crate::ui;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Execute the serve command.
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration or a missing web root
/// - Bind failures
/// - File watcher failures (the process terminates; stale content is not
///   served without live reload)
pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = ServerConfig::load(&args)?;
    config.validate()?;

    run(config, shutdown_signal()).await
}

/// Run the server for a validated config until `shutdown` resolves.
///
/// The event bus is created here and shared by the watcher and the server.
pub async fn run(config: ServerConfig, shutdown: impl Future<Output = ()>) -> Result<()> {
    let bus = Arc::new(EventBus::new());

    let mut watcher = FileWatcher::spawn(
        config.root.clone(),
        config.ignore_list(),
        Arc::clone(&bus),
    )?;

    let root = config.root.clone();
    let server = DevServer::new(config, Arc::clone(&bus));
    let listener = server.bind().await?;
    let url = listening_url(server.config(), &listener)?;

    info!("[http]\tServer listening on {}", url);
    ui::server_banner(&url, &root);

    let outcome = tokio::select! {
        result = server.serve(listener) => result,
        result = watcher.wait() => result,
        _ = shutdown => {
            ui::info("Shutting down development server...");
            Ok(())
        }
    };

    watcher.stop().await?;
    if let Err(err) = outcome {
        ui::error("Development server stopped with an error");
        return Err(err);
    }

    ui::success("Development server stopped");
    Ok(())
}

/// URL of the bound listener; differs from the configured one for port 0.
fn listening_url(config: &ServerConfig, listener: &TcpListener) -> Result<String> {
    let port = listener.local_addr()?.port();
    Ok(ServerConfig {
        port,
        ..config.clone()
    }
    .server_url())
}

/// Resolve on Ctrl+C. Never resolves if the signal handler cannot be installed.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        ui::warning(&format!("Ctrl+C handler unavailable: {}", err));
        std::future::pending::<()>().await;
    }
}
