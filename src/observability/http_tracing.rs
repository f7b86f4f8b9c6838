//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that wraps each request in a `tracing` span and logs the
//! outcome with its latency.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;

/// Create a tracing span for request tracking.
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
}

/// Axum middleware that records method, path, status and latency per request
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let span = request_span!(method, path);
    let response = next.run(request).instrument(span.clone()).await;

    let status_code = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    span.in_scope(|| {
        if status_code >= 500 {
            tracing::warn!(status_code, elapsed_ms, "HTTP request failed");
        } else {
            tracing::debug!(status_code, elapsed_ms, "HTTP request completed");
        }
    });

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[test]
    fn test_request_span_macro_compiles() {
        let _span = request_span!("GET", "/health/live");
    }

    #[tokio::test]
    async fn test_middleware_passes_response_through() {
        let router = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .layer(middleware::from_fn(trace_http_requests));

        let ok = router
            .clone()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let boom = router
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(boom.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
