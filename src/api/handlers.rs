//! HTTP request handlers for the café payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{category_percentages, daily_revenue_series, top_products};
use crate::calculation::{ShiftPayResult, aggregate, compute_shift_pay};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::invoice::ExtractedInvoice;
use crate::models::{EmployeeShift, MonthlyData, PayrollMonth, checked_sum};
use crate::schedule::MonthlySchedule;

use super::request::{
    AssignShiftsRequest, MonthlyPayrollRequest, RevenueSeriesRequest, SalesBreakdownRequest,
    ShiftPayRequest, TechCardQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, InvoiceExistsResponse, RevenueSeriesResponse,
    SalesBreakdownResponse, TechCardsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/monthly", post(monthly_payroll_handler))
        .route("/payroll/shift-pay", post(shift_pay_handler))
        .route("/schedule/assign", post(assign_shifts_handler))
        .route("/sales/revenue-series", post(revenue_series_handler))
        .route("/sales/breakdown", post(sales_breakdown_handler))
        .route("/techcards", get(techcards_handler))
        .route(
            "/invoices",
            post(create_invoice_handler).get(list_invoices_handler),
        )
        .route("/invoices/:number/exists", get(invoice_exists_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, context: &str, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        kind = ?err.kind(),
        "{}", context
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, turning a rejection into a 400 response.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for POST /payroll/monthly.
///
/// Aggregates a month of shifts into half-month and month totals per employee.
async fn monthly_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly payroll request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match compute_monthly(&request, state.config()) {
        Ok(data) => {
            info!(
                correlation_id = %correlation_id,
                year = data.year,
                month = data.month,
                employees = data.employees.len(),
                total_payroll = ?data.total_payroll(),
                duration_us = start_time.elapsed().as_micros(),
                "Monthly payroll completed"
            );
            json_response(StatusCode::OK, data)
        }
        Err(err) => engine_error_response(correlation_id, "Monthly payroll failed", err),
    }
}

fn compute_monthly(
    request: &MonthlyPayrollRequest,
    config: &ConfigLoader,
) -> EngineResult<MonthlyData> {
    let month = PayrollMonth::new(request.year, request.month)?;
    let settings = request.overrides.resolve(config)?;

    aggregate(
        month,
        &request.revenues,
        &request.employees,
        &settings.salary,
        settings.half_boundary_day,
        settings.currency_scale,
    )
}

/// Handler for POST /payroll/shift-pay.
///
/// Prices a single shift against its day's revenue.
async fn shift_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftPayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift pay request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match compute_single_shift(&request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                date = %result.date,
                amount = %result.amount,
                percentage = %result.percentage,
                "Shift pay completed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error_response(correlation_id, "Shift pay failed", err),
    }
}

fn compute_single_shift(
    request: &ShiftPayRequest,
    config: &ConfigLoader,
) -> EngineResult<ShiftPayResult> {
    let settings = request.overrides.resolve(config)?;
    compute_shift_pay(
        &request.shift,
        request.daily_revenue,
        &settings.salary,
        settings.currency_scale,
        1,
    )
}

/// Handler for POST /schedule/assign.
///
/// Applies an assignment batch to one employee's shift list and returns the
/// updated list. Totals are not recomputed.
async fn assign_shifts_handler(
    payload: Result<Json<AssignShiftsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift assignment request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match assign(request) {
        Ok(shifts) => json_response(StatusCode::OK, shifts),
        Err(err) => engine_error_response(correlation_id, "Shift assignment failed", err),
    }
}

fn assign(request: AssignShiftsRequest) -> EngineResult<Vec<EmployeeShift>> {
    let month = request.payroll_month()?;
    let shifts = request
        .shifts
        .unwrap_or_else(|| month.dates().map(EmployeeShift::placeholder).collect());

    let mut lists = BTreeMap::new();
    lists.insert(request.employee_id.clone(), shifts);
    let mut schedule = MonthlySchedule::from_shift_lists(month, lists)?;

    let updated = schedule.assign_shifts(&request.employee_id, &request.dates, request.shift_type)?;
    Ok(updated.to_vec())
}

/// Handler for POST /sales/revenue-series.
///
/// Folds register sales into the daily revenue series of a month.
async fn revenue_series_handler(
    payload: Result<Json<RevenueSeriesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing revenue series request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match revenue_series(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => engine_error_response(correlation_id, "Revenue series failed", err),
    }
}

fn revenue_series(request: &RevenueSeriesRequest) -> EngineResult<RevenueSeriesResponse> {
    let month = PayrollMonth::new(request.year, request.month)?;
    let revenues = daily_revenue_series(&request.sales, month)?;
    let total = checked_sum(revenues.iter().copied()).ok_or_else(|| EngineError::InvalidRevenue {
        value: "sum of the series".to_string(),
        message: format!(
            "revenue total of {}-{:02} is out of range",
            request.year, request.month
        ),
    })?;

    Ok(RevenueSeriesResponse {
        year: request.year,
        month: request.month,
        revenues,
        total,
    })
}

/// Handler for POST /sales/breakdown.
///
/// Ranks best-selling products and converts category volumes into shares.
async fn sales_breakdown_handler(
    payload: Result<Json<SalesBreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing sales breakdown request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match category_percentages(&request.categories) {
        Ok(categories) => json_response(
            StatusCode::OK,
            SalesBreakdownResponse {
                top_products: top_products(&request.products, request.top),
                categories,
            },
        ),
        Err(err) => engine_error_response(correlation_id, "Sales breakdown failed", err),
    }
}

/// Handler for GET /techcards.
///
/// Lists the technical card catalog, optionally filtered by category.
async fn techcards_handler(
    State(state): State<AppState>,
    query: Result<Query<TechCardQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Invalid techcard query");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let entries: Vec<_> = state
        .config()
        .catalog()
        .entries()
        .iter()
        .filter(|entry| query.category.is_none_or(|c| entry.category == c))
        .filter(|entry| !query.drinks_only || entry.category.is_drink())
        .cloned()
        .collect();

    json_response(
        StatusCode::OK,
        TechCardsResponse {
            count: entries.len(),
            entries,
        },
    )
}

/// Handler for POST /invoices.
///
/// Stores a recognized and reviewed invoice. Numbers already stored are
/// rejected with 409.
async fn create_invoice_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractedInvoice>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice");

    let invoice = match parse_json(payload, correlation_id) {
        Ok(invoice) => invoice,
        Err(response) => return response,
    };

    match state.invoices().save(invoice) {
        Ok(stored) => {
            info!(
                correlation_id = %correlation_id,
                number = %stored.number(),
                id = %stored.id,
                "Invoice stored"
            );
            json_response(StatusCode::CREATED, stored)
        }
        Err(err) => engine_error_response(correlation_id, "Invoice rejected", err),
    }
}

/// Handler for GET /invoices.
async fn list_invoices_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.invoices().list())
}

/// Handler for GET /invoices/:number/exists.
async fn invoice_exists_handler(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Response {
    let exists = state.invoices().exists(&number);
    json_response(StatusCode::OK, InvoiceExistsResponse { number, exists })
}
