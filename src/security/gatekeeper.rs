//! Shared-secret authentication for the forward endpoint.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderName, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Secret;
use crate::observability::metrics;

/// Header the caller must present.
pub const TUNNEL_SECRET_HEADER: HeaderName = HeaderName::from_static("x-tunnel-secret");

/// Outcome of the secret check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Compare the `X-Tunnel-Secret` header with the configured secret.
///
/// Exactly one header value is allowed and it must match byte-for-byte.
pub fn authorize(headers: &HeaderMap, secret: &Secret) -> Decision {
    let mut values = headers.get_all(TUNNEL_SECRET_HEADER).iter();
    match (values.next(), values.next()) {
        (Some(value), None) if secret.matches(value.as_bytes()) => Decision::Accept,
        _ => Decision::Reject,
    }
}

/// Rejects unauthenticated requests with 403 before the body is read.
pub async fn gatekeeper_middleware(
    State(secret): State<Secret>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match authorize(request.headers(), &secret) {
        Decision::Accept => next.run(request).await,
        Decision::Reject => {
            let peer = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr);
            tracing::warn!(peer = ?peer, "Invalid secret");
            metrics::record_rejection();
            StatusCode::FORBIDDEN.into_response()
        }
    }
}
