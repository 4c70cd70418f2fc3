//! End-to-end tests for the redirect endpoints, driven through the full
//! router (layers included) with `tower::ServiceExt::oneshot`.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;
use whiplink::api;

async fn send(method: Method, uri: &str) -> Result<Response> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())?;

    Ok(api::app().oneshot(request).await?)
}

fn assert_cors_contract(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "authorization, x-client-info, apikey, content-type"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn options_preflight_on_both_endpoints() -> Result<()> {
    for uri in ["/auth-redirect", "/password-reset-redirect"] {
        let response = send(Method::OPTIONS, uri).await?;

        assert_eq!(response.status(), StatusCode::OK, "preflight on {uri}");
        assert_cors_contract(&response);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty(), "preflight body on {uri}");
    }
    Ok(())
}

#[tokio::test]
async fn auth_redirect_serves_fragment_capture_page() -> Result<()> {
    let response = send(Method::GET, "/auth-redirect").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_cors_contract(&response);

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let page = String::from_utf8(body.to_vec())?;

    assert!(page.contains("window.location.hash"));
    assert!(page.contains("URLSearchParams"));
    assert!(page.contains("parkmywhip://parkmywhip.com?"));
    Ok(())
}

#[tokio::test]
async fn password_reset_redirects_with_token_and_type() -> Result<()> {
    let response = send(
        Method::GET,
        "/password-reset-redirect?token=tok123&type=recovery",
    )
    .await?;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_cors_contract(&response);
    assert_eq!(
        response.headers()[header::LOCATION],
        "parkmywhip://parkmywhip.com/reset-password?token=tok123&type=recovery"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    assert!(body.is_empty());
    Ok(())
}

#[tokio::test]
async fn password_reset_defaults_type_to_recovery() -> Result<()> {
    let response = send(Method::GET, "/password-reset-redirect?token=tok123").await?;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "parkmywhip://parkmywhip.com/reset-password?token=tok123&type=recovery"
    );
    Ok(())
}

#[tokio::test]
async fn password_reset_re_encodes_reserved_characters() -> Result<()> {
    // a%20b decodes to "a b" and must re-encode to a%20b, never a+b
    let response = send(Method::GET, "/password-reset-redirect?token=a%20b").await?;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "parkmywhip://parkmywhip.com/reset-password?token=a%20b&type=recovery"
    );
    Ok(())
}

#[tokio::test]
async fn password_reset_without_token_is_bad_request() -> Result<()> {
    let response = send(Method::GET, "/password-reset-redirect?type=recovery").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_cors_contract(&response);

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let page = String::from_utf8(body.to_vec())?;
    assert!(page.contains("Missing reset token"));
    Ok(())
}

#[tokio::test]
async fn duplicate_query_keys_redirect_with_first_value() -> Result<()> {
    // Repeated keys are legal in a query string; first occurrence wins and
    // the CORS contract still holds
    let response = send(Method::GET, "/password-reset-redirect?token=a&token=b").await?;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_cors_contract(&response);
    assert_eq!(
        response.headers()[header::LOCATION],
        "parkmywhip://parkmywhip.com/reset-password?token=a&type=recovery"
    );
    Ok(())
}

#[tokio::test]
async fn non_options_methods_serve_the_same_responses() -> Result<()> {
    // Only OPTIONS is special; every other method gets the page or redirect
    let response = send(Method::POST, "/auth-redirect").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );

    let response = send(Method::POST, "/password-reset-redirect?token=tok123").await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "parkmywhip://parkmywhip.com/reset-password?token=tok123&type=recovery"
    );
    Ok(())
}

#[tokio::test]
async fn identical_requests_yield_identical_responses() -> Result<()> {
    let first = send(Method::GET, "/password-reset-redirect?token=tok123").await?;
    let second = send(Method::GET, "/password-reset-redirect?token=tok123").await?;

    assert_eq!(first.status(), second.status());
    assert_eq!(
        first.headers()[header::LOCATION],
        second.headers()[header::LOCATION]
    );

    let first_page = to_bytes(send(Method::GET, "/auth-redirect").await?.into_body(), usize::MAX).await?;
    let second_page = to_bytes(send(Method::GET, "/auth-redirect").await?.into_body(), usize::MAX).await?;
    assert_eq!(first_page, second_page);
    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let response = send(Method::GET, "/health").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn health_reports_service_metadata() -> Result<()> {
    let response = send(Method::GET, "/health").await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(json["name"], "whiplink");
    Ok(())
}
