//! HTTP API module for the café payroll engine.
//!
//! This module provides the REST endpoints for monthly payroll, single shift
//! pricing, shift assignment, sales revenue series and breakdowns, technical
//! cards and invoice storage.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignShiftsRequest, MonthlyPayrollRequest, RevenueSeriesRequest, SalesBreakdownRequest,
    SettingsOverride, ShiftPayRequest, TechCardQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, InvoiceExistsResponse, RevenueSeriesResponse,
    SalesBreakdownResponse, TechCardsResponse,
};
pub use state::AppState;
