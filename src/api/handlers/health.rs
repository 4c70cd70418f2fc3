use axum::{
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = "health",
)]
// axum handler for health
pub async fn health() -> impl IntoResponse {
    let body = Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }));

    let mut headers = HeaderMap::new();

    match format!("{}:{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .parse::<HeaderValue>()
    {
        Ok(x_app) => {
            headers.insert("X-App", x_app);
        }
        Err(err) => {
            debug!("Failed to parse X-App header: {}", err);
        }
    }

    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::health;
    use anyhow::Result;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};

    #[tokio::test]
    async fn test_health_reports_name_and_version() -> Result<()> {
        let response = health().await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["X-App"],
            format!("{}:{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")).as_str()
        );

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
