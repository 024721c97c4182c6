use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_calc_core::amortization::{self, LoanRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine-level table input: the figures a caller already holds from
/// `computeSchedule`.
#[derive(Deserialize)]
struct TableInput {
    principal: Decimal,
    term_months: u32,
    monthly_rate: Decimal,
    monthly_payment: Decimal,
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// `{"principal", "annual_rate_pct", "term_months"}` (loose values) to a
/// payment summary. Malformed input yields the zero summary unless
/// `"policy": "strict"` is set.
#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let summary = amortization::summarize_request(&request).map_err(to_napi_error)?;
    serde_json::to_string(&summary).map_err(to_napi_error)
}

#[napi]
pub fn build_amortization_table(input_json: String) -> NapiResult<String> {
    let input: TableInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = amortization::build_amortization_table(
        input.principal,
        input.term_months,
        input.monthly_rate,
        input.monthly_payment,
    );
    serde_json::to_string(&rows).map_err(to_napi_error)
}

/// Full envelope: summary, optional schedule, warnings and metadata.
#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::analyze_request(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
