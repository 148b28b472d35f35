//! Axum router wiring.
//!
//! Layer order (outermost first): accounting -> CORS -> deadline -> handler.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};
use crate::transport::middleware;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/metrics", get(transport::handlers::list_metrics))
        .route("/v1/metrics/query", post(transport::handlers::query_metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .layer(from_fn_with_state(state.clone(), middleware::deadline))
        .layer(from_fn_with_state(state.clone(), middleware::cors))
        .layer(from_fn_with_state(state.clone(), middleware::track))
        .with_state(state)
}
