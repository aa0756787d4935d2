//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the index and forward handlers
//! - Guard the forward route with the gatekeeper
//! - Wire up middleware (tracing, request ID, body limit)
//! - Bind server to listener and shut down gracefully

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::TunnelConfig;
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::observability::metrics;
use crate::relay::Relay;
use crate::security::gatekeeper_middleware;

/// Path of the forward endpoint.
pub const FORWARD_PATH: &str = "/tunnel/forward";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

/// HTTP server for the tunnel.
pub struct TunnelServer {
    router: Router,
    config: TunnelConfig,
}

impl TunnelServer {
    /// Create a new server. Builds the shared outbound client.
    pub fn new(config: TunnelConfig) -> Result<Self, reqwest::Error> {
        let state = AppState {
            relay: Relay::new(&config.upstream)?,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &TunnelConfig, state: AppState) -> Router {
        let secret = config.tunnel.shared_secret.clone();

        Router::new()
            .route(FORWARD_PATH, post(forward_handler))
            .route_layer(middleware::from_fn_with_state(secret, gatekeeper_middleware))
            .route("/", get(index_handler))
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %request_id_of(request),
                            )
                        },
                    ))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TunnelConfig {
        &self.config
    }
}

async fn index_handler() -> &'static str {
    "Tunnel is running"
}

/// Forward handler. Only reached once the gatekeeper accepted the request.
async fn forward_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let start = Instant::now();

    match state.relay.forward(&body).await {
        Ok(response) => {
            metrics::record_request("relayed", response.status().as_u16(), start);
            response
        }
        Err(e) => {
            metrics::record_request(e.outcome(), e.status().as_u16(), start);
            e.into_response()
        }
    }
}
