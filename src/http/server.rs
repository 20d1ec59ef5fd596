//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all relay handler
//! - Wire up middleware (tracing)
//! - Buffer the inbound body and reduce the request to relay inputs
//! - Select the configured route and invoke the forwarder
//! - Record per-request metrics
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::http::request::RequestId;
use crate::http::response::{rejection_response, relay_response};
use crate::observability::metrics;
use crate::relay::{Forwarder, InboundRequest, RelayError, RouteSet};

/// Largest inbound body the relay will buffer.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub routes: Arc<RouteSet>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration. Fails only
    /// when the outbound HTTP client cannot be constructed.
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let forwarder = Arc::new(Forwarder::new(config.backend.clone(), &config.timeouts)?);
        let routes = Arc::new(RouteSet::new(config.routes.clone()));
        let state = AppState { forwarder, routes };
        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router. Every path and method lands in the relay
    /// handler; route selection happens against the configured mounts, not
    /// in the Axum routing table.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Main relay handler: reduce the request, pick a route, forward, render.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let request_id = RequestId::from_headers(request.headers());
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "failed to read request body");
            metrics::record_relay(parts.method.as_str(), "none", 400, started);
            return rejection_response(StatusCode::BAD_REQUEST, "failed to read request body");
        }
    };

    let inbound = InboundRequest::from_parts(parts.method, &parts.uri, &parts.headers, body);

    let Some(route) = state.routes.matching(&inbound.path) else {
        warn!(request_id = %request_id, path = %inbound.path, "no route matched");
        metrics::record_relay(inbound.method.as_str(), "none", 404, started);
        return rejection_response(StatusCode::NOT_FOUND, "no route matches the request path");
    };

    info!(
        request_id = %request_id,
        route = %route.name,
        method = %inbound.method,
        path = %inbound.path,
        "relaying request"
    );

    let outcome = state.forwarder.forward(route, &inbound).await;
    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status(),
    };
    match &outcome {
        Err(RelayError::Upstream { status, .. }) => {
            debug!(request_id = %request_id, status = status.as_u16(), "backend error passed through");
        }
        Err(err) => {
            warn!(request_id = %request_id, route = %route.name, error = %err, "relay failed");
        }
        Ok(_) => {}
    }

    metrics::record_relay(inbound.method.as_str(), &route.name, status.as_u16(), started);
    relay_response(route, outcome)
}
