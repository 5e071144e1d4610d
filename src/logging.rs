//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and logged in full at the `debug` level. Bodies that are not text, such as
/// photo uploads and the images served back, are not read and are only
/// described by their content type.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let request = if is_text(&parts.headers) {
        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!("Could not read request body: {error}");
                return StatusCode::BAD_REQUEST.into_response();
            }
        };
        log_message("Received request", &format!("{parts:#?}"), &bytes);
        Request::from_parts(parts, Body::from(bytes))
    } else {
        tracing::info!(
            "Received request: {parts:#?}\nbody: <{}>",
            content_type(&parts.headers)
        );
        Request::from_parts(parts, body)
    };

    let response = next.run(request).await;
    let (parts, body) = response.into_parts();

    if !is_text(&parts.headers) {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: <{}>",
            content_type(&parts.headers)
        );
        return Response::from_parts(parts, body);
    }

    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            log_message("Sending response", &format!("{parts:#?}"), &bytes);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Whether a body with these headers is worth reading into the log.
///
/// Bodies without a content type are usually empty, so they count as text.
fn is_text(headers: &HeaderMap) -> bool {
    let content_type = content_type(headers);

    content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.starts_with("application/json")
        || content_type.starts_with("application/x-www-form-urlencoded")
}

/// Cut `text` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(text: &str) -> &str {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return text;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_message(prefix: &str, parts: &str, body: &Bytes) {
    let body = String::from_utf8_lossy(body);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{prefix}: {parts}\nbody: {}...", truncate(&body));
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{prefix}: {parts}\nbody: {body:?}");
    }
}
