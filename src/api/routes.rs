use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::observability::trace_http_requests;
use crate::startup::AppContext;

use super::handlers::{liveness_handler, readiness_handler};

#[derive(Clone)]
pub struct ApiState {
    pub context: Arc<AppContext>,
}

impl ApiState {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(state)
        .layer(middleware::from_fn(trace_http_requests))
}
