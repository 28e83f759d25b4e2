//! HTTP front door of the development server.
//!
//! Routes, in priority order:
//! - `/_dev-events` - Server-Sent Events stream of change notifications
//! - `/_dev-events.js` - the embedded reload client
//! - everything else - static files from the web root
//!
//! Matching is by path only; every method is accepted.

use crate::config::ServerConfig;
use crate::dev::{resolver, sse, static_files, DevServerState, EventBus, SharedState};
use crate::error::{DevError, Result};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

/// Event-stream endpoint.
pub const EVENTS_PATH: &str = "/_dev-events";

/// Reload client endpoint, referenced by the injected script tag.
pub const CLIENT_SCRIPT_PATH: &str = "/_dev-events.js";

const RELOAD_CLIENT: &str = include_str!("../../assets/dev/reload-client.js");

/// Development server.
pub struct DevServer {
    /// Server configuration
    config: ServerConfig,
    /// Shared request state
    state: SharedState,
}

impl DevServer {
    /// Create a server for a validated `config`, publishing through `bus`.
    pub fn new(config: ServerConfig, bus: Arc<EventBus>) -> Self {
        let state = Arc::new(DevServerState::new(config.root.clone(), bus));
        Self { config, state }
    }

    /// Configuration the server was created with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shared request state.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Build the router with all routes and layers.
    pub fn router(&self) -> Router {
        Router::new()
            .route(EVENTS_PATH, any(sse::handle_events))
            .route(CLIENT_SCRIPT_PATH, any(handle_reload_script))
            .fallback(handle_static)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache"),
            ))
            .layer(middleware::from_fn(log_request))
            .with_state(Arc::clone(&self.state))
    }

    /// Bind the configured host and port.
    ///
    /// # Errors
    ///
    /// Returns `DevError::Server` if the address cannot be bound.
    pub async fn bind(&self) -> Result<TcpListener> {
        let host = self.config.host.as_str();
        let port = self.config.port;
        TcpListener::bind((host, port))
            .await
            .map_err(|e| DevError::Server(format!("Failed to bind to {}:{}: {}", host, port, e)))
    }

    /// Serve requests from `listener` until the future is dropped.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.router();
        axum::serve(listener, app)
            .await
            .map_err(|e| DevError::Server(format!("Server error: {}", e)))
    }
}

/// Serve the reload client script.
async fn handle_reload_script() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/javascript")],
        RELOAD_CLIENT,
    )
}

/// Resolve and serve a file from the web root.
async fn handle_static(State(state): State<SharedState>, uri: Uri) -> Response {
    match resolver::resolve(state.root(), uri.path()) {
        Some(resolved) => static_files::serve_file(&resolved).await,
        None => static_files::not_found(),
    }
}

/// Log method, path and status of every completed response.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    info!("[http]\t ({}) {} {}", response.status().as_u16(), method, uri);
    response
}
