//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::engine::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, NewHoliday, PayrollRecordId, PayrollStats};

use super::request::GeneratePayrollRequest;
use super::response::{
    ApiErrorResponse, GeneratePayrollResponse, PayslipView, PreviewPayrollResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", get(list_records_handler))
        .route("/payroll/generate", post(generate_handler))
        .route("/payroll/preview", post(preview_handler))
        .route("/payroll/stats", get(stats_handler))
        .route("/payroll/:id", get(get_record_handler))
        .route("/payroll/:id/approve", patch(approve_handler))
        .route("/payroll/:id/reject", patch(reject_handler))
        .route("/employees/:employee_id/payslips", get(employee_payslips_handler))
        .route("/holidays", get(list_holidays_handler).post(add_holiday_handler))
        .with_state(state)
}

/// Handler for POST /payroll/generate.
///
/// Runs payroll for a role group and returns the created records.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GeneratePayrollResponse>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let request = json_body(payload, correlation_id)?;
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let input = request
        .into_input()
        .map_err(|err| rejected(correlation_id, err))?;

    let records = run_blocking(&state, correlation_id, move |engine| {
        engine.generate_payroll_as_of(&input, as_of)
    })
    .await?;

    info!(
        correlation_id = %correlation_id,
        created = records.len(),
        "Payroll generated"
    );
    Ok((
        StatusCode::CREATED,
        Json(GeneratePayrollResponse {
            created: records.len(),
            records,
        }),
    ))
}

/// Handler for POST /payroll/preview.
///
/// Computes payslips with their audit traces without saving them.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> ApiResult<Json<PreviewPayrollResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll preview request");

    let request = json_body(payload, correlation_id)?;
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let input = request
        .into_input()
        .map_err(|err| rejected(correlation_id, err))?;

    let payslips = run_blocking(&state, correlation_id, move |engine| {
        engine.preview_payroll(&input, as_of)
    })
    .await?;

    Ok(Json(PreviewPayrollResponse {
        count: payslips.len(),
        payslips,
    }))
}

/// Handler for GET /payroll.
async fn list_records_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<PayslipView>>> {
    let correlation_id = Uuid::new_v4();
    let records = state
        .engine()
        .list_records()
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(records.into_iter().map(PayslipView::from).collect()))
}

/// Handler for GET /payroll/stats.
async fn stats_handler(State(state): State<AppState>) -> ApiResult<Json<PayrollStats>> {
    let correlation_id = Uuid::new_v4();
    let stats = state
        .engine()
        .stats()
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(stats))
}

/// Handler for GET /payroll/:id.
async fn get_record_handler(
    State(state): State<AppState>,
    id: Result<Path<PayrollRecordId>, PathRejection>,
) -> ApiResult<Json<PayslipView>> {
    let correlation_id = Uuid::new_v4();
    let id = record_id(id, correlation_id)?;
    let record = state
        .engine()
        .find_record(id)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(record.into()))
}

/// Handler for PATCH /payroll/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    id: Result<Path<PayrollRecordId>, PathRejection>,
) -> ApiResult<Json<PayslipView>> {
    let correlation_id = Uuid::new_v4();
    let id = record_id(id, correlation_id)?;
    info!(correlation_id = %correlation_id, record_id = id, "Approving payroll record");
    let record = state
        .engine()
        .approve(id)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(record.into()))
}

/// Handler for PATCH /payroll/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    id: Result<Path<PayrollRecordId>, PathRejection>,
) -> ApiResult<Json<PayslipView>> {
    let correlation_id = Uuid::new_v4();
    let id = record_id(id, correlation_id)?;
    info!(correlation_id = %correlation_id, record_id = id, "Rejecting payroll record");
    let record = state
        .engine()
        .reject(id)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(record.into()))
}

/// Handler for GET /employees/:employee_id/payslips.
async fn employee_payslips_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<Vec<PayslipView>>> {
    let correlation_id = Uuid::new_v4();
    let records = state
        .engine()
        .records_for_employee(&employee_id)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(records.into_iter().map(PayslipView::from).collect()))
}

/// Handler for GET /holidays.
async fn list_holidays_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Holiday>>> {
    let correlation_id = Uuid::new_v4();
    let holidays = state
        .engine()
        .list_holidays()
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(holidays))
}

/// Handler for POST /holidays.
async fn add_holiday_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewHoliday>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Holiday>)> {
    let correlation_id = Uuid::new_v4();
    let holiday = json_body(payload, correlation_id)?;
    let stored = state
        .engine()
        .add_holiday(holiday)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::JsonDataError(err)) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            Err(ApiErrorResponse::invalid_body(body_text))
        }
        Err(JsonRejection::JsonSyntaxError(err)) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            Err(ApiErrorResponse::malformed_json(format!(
                "Invalid JSON syntax: {}",
                err
            )))
        }
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiErrorResponse::malformed_json(
            "Content-Type must be application/json",
        )),
        Err(_) => Err(ApiErrorResponse::malformed_json("Failed to parse request body")),
    }
}

fn record_id(
    id: Result<Path<PayrollRecordId>, PathRejection>,
    correlation_id: Uuid,
) -> ApiResult<PayrollRecordId> {
    id.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid record id");
        ApiErrorResponse::invalid_path(rejection.body_text())
    })
}

fn rejected(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

/// Runs an engine call off the async runtime.
async fn run_blocking<T, F>(state: &AppState, correlation_id: Uuid, call: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&PayrollEngine) -> EngineResult<T> + Send + 'static,
{
    let engine = state.engine_handle();
    match tokio::task::spawn_blocking(move || call(&engine)).await {
        Ok(result) => result.map_err(|err| rejected(correlation_id, err)),
        Err(join_error) => {
            error!(correlation_id = %correlation_id, error = %join_error, "Payroll task failed");
            Err(ApiErrorResponse::internal())
        }
    }
}
