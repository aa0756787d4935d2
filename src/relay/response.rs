//! Translation of an upstream reply into the caller's response.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::relay::dispatch::{UpstreamReply, JSON_UTF8};

/// Build the response returned to the caller.
///
/// 204 carries no body. Every other status is relayed verbatim with the
/// upstream bytes unchanged and a JSON content type.
pub fn relay_response(reply: UpstreamReply) -> Response {
    if reply.status == StatusCode::NO_CONTENT {
        return StatusCode::NO_CONTENT.into_response();
    }

    let mut response = Response::new(Body::from(reply.body));
    *response.status_mut() = reply.status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response
}
