//! Hash-fragment bridge into the app.
//!
//! Auth emails land here with the token payload in the URL hash fragment.
//! Browsers never transmit the fragment, so the server cannot read it; the
//! endpoint instead serves a page whose inline script extracts the fragment
//! client-side and navigates into the `parkmywhip://` scheme. The page keeps
//! a spinner up while that happens and falls back to a "having trouble"
//! message after two seconds, since script cannot observe whether a custom
//! scheme navigation succeeded.

use crate::api::handlers::{html_page, preflight, ApiError};
use axum::{
    http::{Method, StatusCode},
    response::Response,
};
use tracing::info;

// The redirect page. The script mirrors the server-side link builder in
// `deep_link`: encodeURIComponent values, refresh_token defaults to the
// empty string, type defaults to "recovery".
const REDIRECT_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Redirecting - ParkMyWhip</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
      display: flex;
      align-items: center;
      justify-content: center;
      height: 100vh;
      margin: 0;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
    }
    .container {
      text-align: center;
      padding: 2rem;
    }
    .spinner {
      border: 4px solid rgba(255,255,255,0.3);
      border-top: 4px solid white;
      border-radius: 50%;
      width: 50px;
      height: 50px;
      animation: spin 1s linear infinite;
      margin: 0 auto 1.5rem;
    }
    @keyframes spin {
      0% { transform: rotate(0deg); }
      100% { transform: rotate(360deg); }
    }
    h1 { margin: 0 0 0.5rem; font-size: 1.5rem; }
    p { margin: 0; opacity: 0.9; }
  </style>
</head>
<body>
  <div class="container">
    <div class="spinner"></div>
    <h1>Redirecting to ParkMyWhip</h1>
    <p>Please wait while we redirect you to the app...</p>
  </div>

  <script>
    (function() {
      console.log('Full URL:', window.location.href);
      console.log('Hash fragment:', window.location.hash);

      // Everything after #, never sent to the server
      const hash = window.location.hash.substring(1);

      if (!hash) {
        console.error('No hash fragment found');
        document.querySelector('.container').innerHTML =
          '<h1>&#9888;&#65039; Invalid Link</h1><p>This link is invalid or has expired.</p>';
        return;
      }

      // The fragment is itself URL-encoded key=value pairs
      const params = new URLSearchParams(hash);
      const accessToken = params.get('access_token');
      const refreshToken = params.get('refresh_token');
      const type = params.get('type');

      console.log('Parsed params:', { accessToken: accessToken ? 'present' : 'missing', type });

      if (!accessToken) {
        console.error('No access token in hash');
        document.querySelector('.container').innerHTML =
          '<h1>&#9888;&#65039; Invalid Link</h1><p>Missing authentication token.</p>';
        return;
      }

      const deepLinkUrl = 'parkmywhip://parkmywhip.com?' +
        'access_token=' + encodeURIComponent(accessToken) +
        '&refresh_token=' + encodeURIComponent(refreshToken || '') +
        '&type=' + encodeURIComponent(type || 'recovery');

      console.log('Redirecting to:', deepLinkUrl);

      window.location.href = deepLinkUrl;

      // Always fires: success of a custom-scheme navigation is not
      // observable from script, so this is a plain delayed message,
      // not a cancellable task.
      setTimeout(function() {
        document.querySelector('.container').innerHTML =
          '<h1>Having trouble?</h1>' +
          '<p>If the app didn\'t open automatically, please ensure ParkMyWhip is installed.</p>' +
          '<p style="margin-top: 1rem; font-size: 0.9rem;">You can close this window.</p>';
      }, 2000);
    })();
  </script>
</body>
</html>
"##;

#[utoipa::path(
    get,
    path = "/auth-redirect",
    responses(
        (status = 200, description = "HTML page that forwards the URL hash fragment into the app", content_type = "text/html"),
        (status = 500, description = "Unhandled failure while building the response")
    ),
    tag = "redirect",
)]
/// Serve the client-side redirect page.
///
/// The token payload travels in the hash fragment, so the only thing the
/// server can do is hand the browser a script that reads it locally.
pub async fn auth_redirect(method: Method) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(preflight());
    }

    info!("Incoming request to auth-redirect");

    Ok(html_page(StatusCode::OK, REDIRECT_PAGE))
}
