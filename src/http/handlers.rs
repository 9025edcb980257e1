//! Per-route request handlers.
//!
//! Each handler follows the same sequence: validate the payload, check the
//! backend handle is present, issue the RPC under the route's budget, and
//! translate the result. Validation always precedes the presence check, so a
//! malformed request is a 400 even when the backend is down.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::Route;
use crate::health::{self, HealthSnapshot};
use crate::http::error::{ApiError, ApiJson};
use crate::http::server::AppState;
use crate::proto;

/// `POST /api/v1/completion` request body.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    #[serde(default)]
    pub prompt: String,
    pub model: Option<String>,
    pub max_tokens: Option<i32>,
}

/// `POST /api/v1/completion` success body.
#[derive(Debug, Serialize)]
pub struct CompletionResult {
    pub completion: String,
    pub tokens_used: i32,
    pub model: String,
}

/// `POST /api/v1/optimize` request body. Constraint and objective payloads
/// are opaque to the gateway; their schema belongs to the backend.
#[derive(Debug, Deserialize)]
pub struct OptimizationRequest {
    #[serde(default)]
    pub problem_type: String,
    pub constraints_json: Option<String>,
    pub objectives_json: Option<String>,
    pub timeout_seconds: Option<i32>,
}

/// `POST /api/v1/optimize` success body.
#[derive(Debug, Serialize)]
pub struct OptimizationResult {
    pub job_id: String,
    pub status: String,
    pub result: String,
}

/// `GET /api/v1/job/{id}` success body. Timestamps are relayed as the
/// backend's raw unix seconds, uninterpreted.
#[derive(Debug, Serialize)]
pub struct JobStatusResult {
    pub job_id: String,
    pub status: String,
    pub result: String,
    pub error: String,
    pub created_at: i64,
    pub completed_at: i64,
}

/// `GET /api/v1/ping` body.
#[derive(Debug, Serialize)]
pub struct PingResult {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Gateway liveness ping. Never touches the backend.
pub async fn ping() -> Json<PingResult> {
    Json(PingResult {
        message: "pong from ai-gateway".to_string(),
        timestamp: Utc::now(),
    })
}

/// Readiness report. Always HTTP 200: the status code says the gateway is
/// up, the body carries the live-probed state of its dependency.
pub async fn health(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(health::report(state.backend_opt(), state.timeouts()).await)
}

/// Forward a completion request to the backend.
pub async fn completion(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CompletionRequest>,
) -> Result<Json<CompletionResult>, ApiError> {
    if req.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt is required".to_string()));
    }
    let backend = state.backend()?;

    tracing::debug!(prompt_len = req.prompt.len(), "Forwarding completion request");

    let response = backend
        .get_completion(
            proto::CompletionRequest {
                prompt: req.prompt,
                model: req.model.unwrap_or_default(),
                max_tokens: req.max_tokens.unwrap_or_default(),
            },
            state.timeouts().budget(Route::Completion),
        )
        .await?;

    Ok(Json(CompletionResult {
        completion: response.completion,
        tokens_used: response.tokens_used,
        model: response.model,
    }))
}

/// Queue an optimization job on the backend.
pub async fn optimize(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<OptimizationRequest>,
) -> Result<Json<OptimizationResult>, ApiError> {
    if req.problem_type.trim().is_empty() {
        return Err(ApiError::BadRequest("problem_type is required".to_string()));
    }
    let backend = state.backend()?;

    tracing::debug!(problem_type = %req.problem_type, "Forwarding optimization request");

    let response = backend
        .solve_optimization(
            proto::OptimizationRequest {
                problem_type: req.problem_type,
                constraints_json: req.constraints_json.unwrap_or_default(),
                objectives_json: req.objectives_json.unwrap_or_default(),
                timeout_seconds: req.timeout_seconds.unwrap_or_default(),
            },
            state.timeouts().budget(Route::Optimize),
        )
        .await?;

    Ok(Json(OptimizationResult {
        job_id: response.job_id,
        status: response.status,
        result: response.result_json,
    }))
}

/// Relay a job-status record from the backend. The status tag is passed
/// through uninterpreted whether the job succeeded, failed, or is running.
pub async fn job_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobStatusResult>, ApiError> {
    let backend = state.backend()?;

    let response = backend
        .get_job_status(
            proto::JobStatusRequest { job_id: id },
            state.timeouts().budget(Route::JobStatus),
        )
        .await?;

    Ok(Json(JobStatusResult {
        job_id: response.job_id,
        status: response.status,
        result: response.result_json,
        error: response.error_message,
        created_at: response.created_at,
        completed_at: response.completed_at,
    }))
}
