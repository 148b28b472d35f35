//! Request middleware: accounting, CORS, deadline.

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use rtprobe_core::ProbeError;

use crate::app_state::AppState;
use crate::transport::handlers::ApiError;

/// Feed every finished request into the `/http/*` counters.
pub async fn track(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let res = next.run(req).await;
    let status = res.status();
    app.http_metrics()
        .record(started.elapsed(), status.is_client_error() || status.is_server_error());
    res
}

/// Permissive CORS unless `server.disable_cors`. Answers preflights directly.
pub async fn cors(State(app): State<AppState>, req: Request, next: Next) -> Response {
    if app.cfg().server.disable_cors {
        return next.run(req).await;
    }

    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let h = res.headers_mut();
    h.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    h.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    h.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    res
}

/// Bound the whole request by `server.request_timeout_seconds`.
pub async fn deadline(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let limit = Duration::from_secs(app.cfg().server.request_timeout_seconds);
    let path = req.uri().path().to_owned();

    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(%path, ?limit, "request timed out");
            ApiError(ProbeError::Timeout).into_response()
        }
    }
}
