//! Relay error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Failure while contacting the target.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid target URL {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Every way a forward request can end without a relayed upstream response.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    #[error("invalid plugin identifier {0:?}")]
    InvalidPlugin(String),

    #[error("no target URL")]
    MissingTarget,

    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MalformedPayload(_)
            | RelayError::InvalidMethod(_)
            | RelayError::InvalidPlugin(_)
            | RelayError::MissingTarget => StatusCode::BAD_REQUEST,
            RelayError::Dispatch(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MalformedPayload(_)
            | RelayError::InvalidMethod(_)
            | RelayError::InvalidPlugin(_) => "malformed_payload",
            RelayError::MissingTarget => "missing_target",
            RelayError::Dispatch(_) => "dispatch_failed",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MalformedPayload(_) => {
                (StatusCode::BAD_REQUEST, Json("Invalid JSON")).into_response()
            }
            RelayError::InvalidMethod(_) => {
                (StatusCode::BAD_REQUEST, Json("Invalid method")).into_response()
            }
            RelayError::InvalidPlugin(_) => {
                (StatusCode::BAD_REQUEST, Json("Invalid plugin")).into_response()
            }
            RelayError::MissingTarget => {
                (StatusCode::BAD_REQUEST, Json("No target URL")).into_response()
            }
            // Upstream detail stays in the server log.
            RelayError::Dispatch(_) => StatusCode::BAD_GATEWAY.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(RelayError::from(parse_err).status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MissingTarget.status(), StatusCode::BAD_REQUEST);

        let dispatch = DispatchError::InvalidTarget {
            target: "nope".into(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        let err = RelayError::from(dispatch);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.outcome(), "dispatch_failed");
    }

    #[test]
    fn test_bad_gateway_has_no_body() {
        let dispatch = DispatchError::InvalidTarget {
            target: "nope".into(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        let response = RelayError::from(dispatch).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(response.headers().get("content-type").is_none());
    }
}
