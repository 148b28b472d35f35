//! Metric endpoints.
//!
//! - `GET  /v1/metrics`       : catalog, no values
//! - `POST /v1/metrics/query` : `{"metrics": [names]}` -> typed values
//!
//! Bodies are decoded here (not by the `Json` extractor) so malformed input is
//! reported with the same error envelope as every other failure.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use rtprobe_core::error::{ClientCode, ProbeError, Result};
use rtprobe_core::MetricReport;

use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryRequest {
    pub metrics: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MetricsBody<T> {
    metrics: T,
}

/// Error envelope: `{"error": {"code": "...", "msg": "..."}}`.
#[derive(Debug)]
pub struct ApiError(pub ProbeError);

impl From<ProbeError> for ApiError {
    fn from(e: ProbeError) -> Self {
        Self(e)
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::UnknownMetric => StatusCode::NOT_FOUND,
        ClientCode::UnsupportedKind => StatusCode::UNPROCESSABLE_ENTITY,
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::Timeout => StatusCode::REQUEST_TIMEOUT,
        ClientCode::KindDrift | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let body = json!({
            "error": {
                "code": code.as_str(),
                "msg": self.0.to_string(),
            }
        });
        (status_for(code), Json(body)).into_response()
    }
}

pub async fn list_metrics(State(app): State<AppState>) -> impl IntoResponse {
    Json(MetricsBody {
        metrics: app.engine().list_all(),
    })
}

pub async fn query_metrics(
    State(app): State<AppState>,
    body: Bytes,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let reports = run_query(app, body).await?;
    Ok(Json(MetricsBody { metrics: reports }))
}

async fn run_query(app: AppState, body: Bytes) -> Result<Vec<MetricReport>> {
    let req: QueryRequest = serde_json::from_slice(&body)
        .map_err(|e| ProbeError::BadRequest(format!("invalid query body: {e}")))?;

    // Process samplers refresh sysinfo under a lock; keep that off the async workers.
    tokio::task::spawn_blocking(move || app.engine().query(&req.metrics))
        .await
        .map_err(|e| ProbeError::Internal(format!("query task failed: {e}")))?
}
