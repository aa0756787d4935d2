//! Outbound dispatch through the shared HTTP client.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::directive::OutboundRequest;
use crate::relay::error::DispatchError;

/// Header carrying the caller's plugin name to the target.
pub const FROM_TUNNEL_PLUGIN: HeaderName = HeaderName::from_static("x-from-tunnel-plugin");

/// Media type used for forwarded and relayed content.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// What the target sent back.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends outbound requests. Holds one `reqwest::Client`, created at startup
/// and shared by every request.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send `request` and read the whole response body.
    pub async fn dispatch(&self, request: &OutboundRequest) -> Result<UpstreamReply, DispatchError> {
        let url = Url::parse(&request.target).map_err(|source| DispatchError::InvalidTarget {
            target: request.target.clone(),
            source,
        })?;

        let mut outbound = self
            .client
            .request(request.method.clone(), url)
            .header(FROM_TUNNEL_PLUGIN, request.plugin_header.clone());

        if let Some(body) = &request.body {
            outbound = outbound
                .header(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
                .body(body.clone());
        }

        let response = outbound.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(UpstreamReply { status, body })
    }
}
