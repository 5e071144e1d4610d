//! The responses for API requests that no route handles.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ErrorBody;

/// A route handler for unknown `/api` paths.
///
/// Responds with a JSON 404 instead of the frontend's `index.html` so that
/// API clients get an error they can read.
pub async fn get_api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        ErrorBody::new("API route not found".to_owned()),
    )
        .into_response()
}

/// A route handler for API paths that exist but not for the request's method.
pub async fn get_api_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorBody::new("method not allowed".to_owned()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        not_found::{get_api_method_not_allowed, get_api_not_found},
        response::ErrorBody,
        test_utils::{assert_content_type, json_body},
    };

    #[tokio::test]
    async fn returns_json_404() {
        let response = get_api_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_content_type(&response, "application/json");
        let body: ErrorBody = json_body(response).await;
        assert_eq!(body.error, "API route not found");
    }

    #[tokio::test]
    async fn method_not_allowed_is_json_405() {
        let response = get_api_method_not_allowed().await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_content_type(&response, "application/json");
        let body: ErrorBody = json_body(response).await;
        assert_eq!(body.error, "method not allowed");
    }
}
