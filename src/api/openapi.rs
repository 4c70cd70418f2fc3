use crate::api::handlers::{auth_redirect, health, password_reset};
use utoipa::openapi::{InfoBuilder, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that drives the `OpenAPI` document.
///
/// Serving happens in [`crate::api::app`], which registers the redirect
/// endpoints with `any` so every method is answered; this router only
/// collects the `#[utoipa::path]` annotations into the generated spec.
/// Add new endpoints here via `.routes(routes!(...))` to document them.
fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth_redirect::auth_redirect))
        .routes(routes!(password_reset::password_reset));

    let mut redirect_tag = Tag::new("redirect");
    redirect_tag.description =
        Some("Bridges web auth flows into the ParkMyWhip app via deep links".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service liveness".to_string());

    router.get_openapi_mut().tags = Some(vec![redirect_tag, health_tag]);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    OpenApiBuilder::new().info(info).build()
}
