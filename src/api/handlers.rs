//! HTTP request handlers for the payroll run API.
//!
//! Exposes the run lifecycle (`generate`, `close`, `reopen`) plus
//! read-side conveniences on a [`axum::Router`].

use std::sync::MutexGuard;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::PayrollEngine;
use crate::models::{PayrollRun, Payslip};
use crate::store::{MemoryStore, PayrollStore};

use super::request::{ActorRequest, CreateRunRequest};
use super::response::{ApiError, ApiErrorResponse, GenerateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/runs", post(create_run_handler))
        .route("/runs/:id", get(get_run_handler))
        .route("/runs/:id/payslips", get(list_payslips_handler))
        .route("/runs/:id/generate", post(generate_handler))
        .route("/runs/:id/close", post(close_handler))
        .route("/runs/:id/reopen", post(reopen_handler))
        .with_state(state)
}

/// Locks the store, surfacing a poisoned mutex as a server error.
fn lock_store(state: &AppState) -> Result<MutexGuard<'_, MemoryStore>, ApiErrorResponse> {
    state.store().lock().map_err(|_| ApiErrorResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        error: ApiError::new("INTERNAL_ERROR", "Payroll store is unavailable"),
    })
}

/// Unwraps a JSON body, mapping rejections to a 400 response.
fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected request body");
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::malformed_json(rejection.body_text()),
        }
    })
}

/// Handler for `POST /runs`: creates a draft run for a period.
async fn create_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRunRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PayrollRun>), ApiErrorResponse> {
    let request = parse_json(payload)?;
    let mut store = lock_store(&state)?;

    let mut run = store
        .create_run(request.year, request.month)
        .map_err(ApiErrorResponse::from)?;
    if !request.note.is_empty() {
        run.note = request.note;
        store.save_run(&run);
    }

    info!(run_id = %run.id, period = %run.period_label(), "payroll run created");
    Ok((StatusCode::CREATED, Json(run)))
}

/// Handler for `GET /runs/{id}`.
async fn get_run_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayrollRun>, ApiErrorResponse> {
    let store = lock_store(&state)?;
    let run = store
        .run(id)
        .ok_or(crate::error::EngineError::RunNotFound { id })
        .map_err(ApiErrorResponse::from)?;
    Ok(Json(run))
}

/// Handler for `GET /runs/{id}/payslips`.
async fn list_payslips_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Payslip>>, ApiErrorResponse> {
    let store = lock_store(&state)?;
    if store.run(id).is_none() {
        return Err(crate::error::EngineError::RunNotFound { id }.into());
    }
    Ok(Json(store.payslips_for_run(id)))
}

/// Handler for `POST /runs/{id}/generate`.
async fn generate_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiErrorResponse> {
    let request = parse_json(payload)?;
    let mut store = lock_store(&state)?;

    let engine = PayrollEngine::new(state.config(), state.notifier());
    let payslip_ids = engine
        .generate(&mut *store, id, &request.actor_id)
        .map_err(ApiErrorResponse::from)?;

    Ok(Json(GenerateResponse {
        detail: "Run processed".to_string(),
        payslip_ids,
    }))
}

/// Handler for `POST /runs/{id}/close`.
async fn close_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<Json<PayrollRun>, ApiErrorResponse> {
    let request = parse_json(payload)?;
    let mut store = lock_store(&state)?;

    let engine = PayrollEngine::new(state.config(), state.notifier());
    let run = engine
        .close(&mut *store, id, &request.actor_id)
        .map_err(ApiErrorResponse::from)?;

    Ok(Json(run))
}

/// Handler for `POST /runs/{id}/reopen`.
async fn reopen_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<Json<PayrollRun>, ApiErrorResponse> {
    let request = parse_json(payload)?;
    let mut store = lock_store(&state)?;

    let engine = PayrollEngine::new(state.config(), state.notifier());
    let run = engine
        .reopen(&mut *store, id, &request.actor_id)
        .map_err(ApiErrorResponse::from)?;

    Ok(Json(run))
}
