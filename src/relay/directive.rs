//! Forward directive decoding and outbound request construction.

use axum::http::{HeaderValue, Method};
use serde::{Deserialize, Serialize};

use crate::relay::error::RelayError;

/// Plugin name used when the caller did not identify itself.
pub const UNKNOWN_PLUGIN: &str = "unknown";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The inbound forwarding instruction.
///
/// Property names are case-sensitive and unknown properties are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForwardDirective {
    pub target: Option<String>,
    pub method: Option<String>,
    pub plugin: Option<String>,
    pub body: Option<String>,
}

impl ForwardDirective {
    /// Decode a directive from raw body bytes.
    ///
    /// A leading UTF-8 byte-order mark is skipped. A JSON `null` document
    /// decodes to `None`.
    pub fn decode(bytes: &[u8]) -> Result<Option<Self>, serde_json::Error> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        serde_json::from_slice(bytes)
    }
}

/// A validated request ready to be dispatched.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub target: String,
    pub plugin: String,
    pub plugin_header: HeaderValue,
    /// JSON content to attach. Always `None` for GET and HEAD.
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Validate a decoded directive.
    ///
    /// The target is only checked for blankness; URL syntax errors surface
    /// when the request is dispatched.
    pub fn from_directive(directive: Option<ForwardDirective>) -> Result<Self, RelayError> {
        let directive = directive.ok_or(RelayError::MissingTarget)?;

        let target = match directive.target {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(RelayError::MissingTarget),
        };

        let method = resolve_method(directive.method.as_deref())?;

        let plugin = match directive.plugin {
            Some(p) if !p.trim().is_empty() => p,
            _ => UNKNOWN_PLUGIN.to_string(),
        };
        let plugin_header = HeaderValue::from_bytes(plugin.as_bytes())
            .map_err(|_| RelayError::InvalidPlugin(plugin.clone()))?;

        let body = directive
            .body
            .filter(|b| !b.is_empty())
            .filter(|_| method != Method::GET && method != Method::HEAD);

        Ok(Self {
            method,
            target,
            plugin,
            plugin_header,
            body,
        })
    }
}

/// Uppercase the requested method, defaulting to POST.
fn resolve_method(raw: Option<&str>) -> Result<Method, RelayError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Method::POST),
        Some(m) => Method::from_bytes(m.to_ascii_uppercase().as_bytes())
            .map_err(|_| RelayError::InvalidMethod(m.to_string())),
    }
}
