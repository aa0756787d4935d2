//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! body bytes (already authenticated)
//!     → directive.rs (decode ForwardDirective, validate, build OutboundRequest)
//!     → dispatch.rs (send via shared reqwest::Client)
//!     → response.rs (status/body passthrough, 204 without body)
//! ```
//!
//! Failures at any stage end the request with one status; nothing is retried.

pub mod directive;
pub mod dispatch;
pub mod error;
pub mod response;

use axum::response::Response;

use crate::config::UpstreamConfig;
use crate::observability::logging;

pub use directive::{ForwardDirective, OutboundRequest, UNKNOWN_PLUGIN};
pub use dispatch::{Dispatcher, UpstreamReply, FROM_TUNNEL_PLUGIN, JSON_UTF8};
pub use error::{DispatchError, RelayError};

/// Executes forward directives.
#[derive(Debug, Clone)]
pub struct Relay {
    dispatcher: Dispatcher,
}

impl Relay {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            dispatcher: Dispatcher::new(config)?,
        })
    }

    /// Run one directive from raw body bytes to the caller's response.
    pub async fn forward(&self, body: &[u8]) -> Result<Response, RelayError> {
        tracing::info!(len = body.len(), "Forward directive received");
        tracing::debug!(json = %String::from_utf8_lossy(body), "Forward directive payload");

        let directive = ForwardDirective::decode(body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to decode forward directive");
            RelayError::MalformedPayload(e)
        })?;

        let request = OutboundRequest::from_directive(directive)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected forward directive"))?;

        tracing::info!(plugin = %request.plugin, "Request from plugin");
        tracing::info!(method = %request.method, url = %request.target, "Forwarding");

        let reply = self.dispatcher.dispatch(&request).await.map_err(|e| {
            tracing::error!(url = %request.target, error = ?e, "Dispatch failed");
            RelayError::Dispatch(e)
        })?;

        tracing::info!(status = %reply.status, "Target responded");
        logging::log_body_preview(&reply.body);

        Ok(response::relay_response(reply))
    }
}
