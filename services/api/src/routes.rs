use crate::infra::{AppState, Catalog};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use rentify::listings::catalog_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_catalog_routes(service: Arc<Catalog>) -> axum::Router {
    catalog_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_catalog;
    use axum::body::Body;
    use axum::http::Request;
    use rentify::config::CatalogConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_route_is_mounted_next_to_catalog_routes() {
        let catalog = build_catalog(&CatalogConfig::default()).expect("sample catalog");
        let router = with_catalog_routes(catalog);

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(health.status(), StatusCode::OK);

        let detail = router
            .oneshot(
                Request::get("/api/v1/properties/1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(detail.status(), StatusCode::OK);
    }
}
