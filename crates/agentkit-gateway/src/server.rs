// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state, and runs the server as a
//! background task that stops cooperatively on a cancellation token.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use agentkit_core::{KitError, PerformTarget};

use crate::auth::{credential_middleware, AuthConfig};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct EndpointState {
    /// The dispatcher being served.
    pub target: Arc<dyn PerformTarget>,
    /// Credential check for the perform route.
    pub auth: AuthConfig,
    /// Start time for uptime reporting.
    pub started: Instant,
}

impl EndpointState {
    pub fn new(target: Arc<dyn PerformTarget>, credential: Option<String>) -> Self {
        Self {
            target,
            auth: AuthConfig { credential },
            started: Instant::now(),
        }
    }
}

/// Builds the endpoint router:
/// - GET /mcp/info (public, liveness probe)
/// - GET /health (public)
/// - POST /mcp/perform (credential-checked)
pub fn router(state: EndpointState) -> Router {
    let public_routes = Router::new()
        .route("/mcp/info", get(handlers::get_info))
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/mcp/perform", post(handlers::post_perform))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            credential_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}

/// Binds a listener. `None` lets the OS pick a free port.
pub async fn bind(host: &str, port: Option<u16>) -> Result<TcpListener, KitError> {
    let addr = format!("{host}:{}", port.unwrap_or(0));
    TcpListener::bind(&addr)
        .await
        .map_err(|e| KitError::Endpoint {
            message: format!("failed to bind endpoint to {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// A running endpoint server.
pub struct Endpoint {
    base_url: String,
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl Endpoint {
    /// Serves `state` on an already-bound listener in a background task.
    pub fn spawn(listener: TcpListener, state: EndpointState) -> Result<Self, KitError> {
        let local_addr = listener.local_addr().map_err(|e| KitError::Endpoint {
            message: format!("failed to read endpoint address: {e}"),
            source: Some(Box::new(e)),
        })?;
        let base_url = format!("http://{local_addr}");
        let shutdown = CancellationToken::new();

        let app = router(state);
        let signal = shutdown.clone().cancelled_owned();
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                tracing::error!("endpoint server error: {e}");
            }
        });

        tracing::info!(%local_addr, "endpoint listening");
        Ok(Self {
            base_url,
            local_addr,
            shutdown,
            handle,
        })
    }

    /// `http://host:port` of this endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signals graceful shutdown and waits up to `grace` for in-flight
    /// requests to finish before aborting the task.
    pub async fn stop(mut self, grace: Duration) {
        if self.handle.is_finished() {
            tracing::warn!(base_url = %self.base_url, "endpoint task had already exited");
        }
        self.shutdown.cancel();
        if tokio::time::timeout(grace, &mut self.handle).await.is_err() {
            tracing::warn!(base_url = %self.base_url, "endpoint did not stop in time, aborting");
            self.handle.abort();
        }
        tracing::info!(base_url = %self.base_url, "endpoint stopped");
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
