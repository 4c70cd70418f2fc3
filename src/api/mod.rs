use crate::api::handlers::{auth_redirect, health, password_reset};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;

pub mod deep_link;
pub mod handlers;
mod openapi;

pub use self::openapi::openapi;

/// Build the application router.
///
/// The redirect endpoints answer every HTTP method: OPTIONS gets the CORS
/// preflight (branched inside each handler), anything else gets the page or
/// redirect. Routing is therefore registered with `any` here instead of
/// through [`openapi::api_router`], which only generates the `OpenAPI`
/// document from the same annotated handlers.
#[must_use]
pub fn app() -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth-redirect", any(auth_redirect::auth_redirect))
        .route(
            "/password-reset-redirect",
            any(password_reset::password_reset),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Bind and serve until interrupted.
///
/// # Errors
///
/// Returns an error if the server fails to start
pub async fn new(port: u16) -> Result<()> {
    let app = app();

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;

    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
