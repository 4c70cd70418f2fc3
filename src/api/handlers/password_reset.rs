//! Query-parameter bridge into the app.
//!
//! Unlike the hash-fragment flow, the reset token arrives as a plain query
//! parameter the server can read, so this endpoint answers with a direct
//! HTTP 302 into the `parkmywhip://` scheme. A missing token gets an HTML
//! error page pointing back at the app.

use crate::api::{
    deep_link,
    handlers::{deep_link_redirect, html_page, preflight, ApiError},
};
use axum::{
    extract::RawQuery,
    http::{Method, StatusCode, Uri},
    response::Response,
};
use tracing::{debug, info, warn};

const MISSING_TOKEN_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Error - ParkMyWhip</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      display: flex;
      justify-content: center;
      align-items: center;
      height: 100vh;
      margin: 0;
      background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);
      color: white;
    }
    .container {
      text-align: center;
      padding: 40px;
    }
    .error { color: #ff6b6b; }
    a { color: #FFD700; }
  </style>
</head>
<body>
  <div class="container">
    <h2><span class="error">Error</span></h2>
    <p>Missing reset token. Please request a new password reset link.</p>
    <p><a href="parkmywhip://parkmywhip.com">Open ParkMyWhip App</a></p>
  </div>
</body>
</html>
"##;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResetQuery {
    pub token: Option<String>,
    pub flow_type: Option<String>,
}

impl ResetQuery {
    /// Lenient query parsing: first occurrence wins, unknown keys are
    /// ignored, nothing rejects. Same semantics as `URLSearchParams.get`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "token" if params.token.is_none() => params.token = Some(value.into_owned()),
                "type" if params.flow_type.is_none() => {
                    params.flow_type = Some(value.into_owned());
                }
                _ => {}
            }
        }

        params
    }
}

#[utoipa::path(
    get,
    path = "/password-reset-redirect",
    params(
        ("token" = Option<String>, Query, description = "Reset token issued by the auth backend"),
        ("type" = Option<String>, Query, description = "Auth flow type, defaults to recovery"),
    ),
    responses(
        (status = 302, description = "Redirect into the app's reset-password deep link"),
        (status = 400, description = "Missing reset token", content_type = "text/html"),
        (status = 500, description = "Unhandled failure while building the response")
    ),
    tag = "redirect",
)]
/// Redirect a server-visible reset token into the app.
pub async fn password_reset(
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(preflight());
    }

    info!("Incoming request to password-reset-redirect: {uri}");

    let params = ResetQuery::parse(query.as_deref().unwrap_or_default());

    // Empty values count as absent, same as the in-page script
    let token = params.token.as_deref().filter(|t| !t.is_empty());
    let flow_type = params
        .flow_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(deep_link::DEFAULT_FLOW_TYPE);

    debug!(
        token = if token.is_some() { "present" } else { "missing" },
        flow_type, "Parsed query params"
    );

    let Some(token) = token else {
        warn!("Password reset link without token");
        return Ok(html_page(StatusCode::BAD_REQUEST, MISSING_TOKEN_PAGE));
    };

    let location = deep_link::reset_password(token, flow_type);

    debug!("Redirecting to app scheme");

    deep_link_redirect(&location)
}
