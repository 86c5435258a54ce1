//! HTTP API module for the Payroll Engine.
//!
//! This module exposes payroll generation, preview, review (approve and
//! reject), payslip views and the holiday calendar over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::GeneratePayrollRequest;
pub use response::{
    ApiError, ApiErrorResponse, GeneratePayrollResponse, PayslipView, PreviewPayrollResponse,
};
pub use state::AppState;
