pub mod auth_redirect;
pub mod health;
pub mod password_reset;

// Shared response building for the redirect endpoints. Every response they
// produce (preflight, page, 302, 500) goes through here so the CORS contract
// stays identical across handlers.

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

/// The fixed CORS contract shared by both redirect endpoints.
#[must_use]
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("authorization, x-client-info, apikey, content-type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
    headers
}

/// CORS preflight answer: 200, empty body, permission headers only.
#[must_use]
pub fn preflight() -> Response {
    (StatusCode::OK, cors_headers()).into_response()
}

/// HTML page with the CORS headers attached.
#[must_use]
pub fn html_page(status: StatusCode, body: &'static str) -> Response {
    (status, cors_headers(), Html(body)).into_response()
}

/// HTTP 302 into the app scheme, no body.
///
/// # Errors
///
/// Returns [`ApiError`] if the location is not a valid header value
pub fn deep_link_redirect(location: &str) -> Result<Response, ApiError> {
    let mut headers = cors_headers();
    headers.insert(header::LOCATION, HeaderValue::from_str(location)?);

    Ok((StatusCode::FOUND, headers).into_response())
}

/// Unhandled failure while building a response.
///
/// Rendered as a 500 with a JSON body and the CORS headers, the one error
/// contract both endpoints share; browser callers need the permission
/// headers even on failure.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Unhandled error while building response: {:#}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            cors_headers(),
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
