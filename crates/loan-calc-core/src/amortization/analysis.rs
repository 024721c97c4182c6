use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::input::{InputPolicy, LoanInput, RawLoanInput};
use super::schedule::{compute_schedule, PaymentSummary};
use super::table::{build_amortization_table, PeriodRow, BALANCE_CLAMP_THRESHOLD};
use crate::error::LoanCalcError;
use crate::types::{with_metadata, ComputationOutput};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// A loan calculation request as it arrives from a file, stdin or JS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(flatten)]
    pub loan: RawLoanInput,
    #[serde(default)]
    pub policy: InputPolicy,
    /// Attach the month-by-month schedule to the result.
    #[serde(default)]
    pub include_schedule: bool,
}

/// Summary plus (optionally) the full schedule for one loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub input: LoanInput,
    pub summary: PaymentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<PeriodRow>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the amortization engine on a typed input and wrap the result.
pub fn analyze_loan(input: &LoanInput, include_schedule: bool) -> ComputationOutput<LoanAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let summary = compute_schedule(input.principal, input.annual_rate_pct, input.term_months);

    if input.is_degenerate() {
        warnings.push(
            "Principal, term or rate is missing or non-positive; returning zero result".into(),
        );
    } else if summary.is_zero() {
        warnings.push("Loan amounts exceed decimal range; returning zero result".into());
    } else if input.annual_rate_pct.is_zero() {
        warnings.push("Zero interest rate; principal is repaid straight-line".into());
    }

    let schedule = include_schedule.then(|| {
        build_amortization_table(
            input.principal,
            input.term_months,
            summary.monthly_rate,
            summary.monthly_payment,
        )
    });

    let assumptions = serde_json::json!({
        "rate_convention": "nominal annual rate / 12",
        "payment_timing": "end of month",
        "final_period": "absorbs remaining balance",
        "balance_clamp": BALANCE_CLAMP_THRESHOLD,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Level-payment annuity amortization",
        &assumptions,
        warnings,
        elapsed,
        LoanAnalysis {
            input: input.clone(),
            summary,
            schedule,
        },
    )
}

/// Resolve a raw request under its policy, then analyze it.
///
/// Only the strict policy returns errors: malformed or degenerate fields, or
/// a loan too large to compute.
pub fn analyze_request(request: &LoanRequest) -> LoanCalcResult<ComputationOutput<LoanAnalysis>> {
    let input = request.loan.resolve(request.policy)?;
    let output = analyze_loan(&input, request.include_schedule);
    check_strict_summary(request.policy, &input, &output.result.summary)?;
    Ok(output)
}

/// Resolve a raw request under its policy and compute only the payment
/// summary. Errors follow [`analyze_request`].
pub fn summarize_request(request: &LoanRequest) -> LoanCalcResult<PaymentSummary> {
    let input = request.loan.resolve(request.policy)?;
    let summary = compute_schedule(input.principal, input.annual_rate_pct, input.term_months);
    check_strict_summary(request.policy, &input, &summary)?;
    Ok(summary)
}

/// A validated strict input can only produce the zero summary by overflowing.
fn check_strict_summary(
    policy: InputPolicy,
    input: &LoanInput,
    summary: &PaymentSummary,
) -> LoanCalcResult<()> {
    if policy == InputPolicy::Strict && summary.is_zero() {
        return Err(LoanCalcError::Overflow {
            context: format!(
                "monthly payment for principal {} at {}% over {} months",
                input.principal, input.annual_rate_pct, input.term_months
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn standard_input() -> LoanInput {
        LoanInput::new(dec!(500000), dec!(12), 24)
    }

    #[test]
    fn test_analyze_without_schedule() {
        let out = analyze_loan(&standard_input(), false);
        assert!(out.result.schedule.is_none());
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.summary.monthly_rate, dec!(0.01));
    }

    #[test]
    fn test_analyze_with_schedule() {
        let out = analyze_loan(&standard_input(), true);
        let rows = out.result.schedule.unwrap();
        assert_eq!(rows.len(), 24);
        assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_input_warns() {
        let out = analyze_loan(&LoanInput::default(), true);
        assert!(out.result.summary.is_zero());
        assert_eq!(out.result.schedule, Some(vec![]));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_rate_warns() {
        let out = analyze_loan(&LoanInput::new(dec!(120000), Decimal::ZERO, 12), false);
        assert_eq!(out.result.summary.monthly_payment, dec!(10000));
        assert!(out.warnings[0].contains("straight-line"));
    }

    #[test]
    fn test_request_json_defaults_to_tolerant() {
        let req: LoanRequest =
            serde_json::from_str(r#"{"principal": "abc", "annual_rate_pct": 12, "term_months": 24}"#)
                .unwrap();
        assert_eq!(req.policy, InputPolicy::Tolerant);
        let out = analyze_request(&req).unwrap();
        assert!(out.result.summary.is_zero());
    }

    #[test]
    fn test_strict_request_rejects_malformed() {
        let req: LoanRequest = serde_json::from_str(
            r#"{"principal": "abc", "annual_rate_pct": 12, "term_months": 24, "policy": "strict"}"#,
        )
        .unwrap();
        assert!(matches!(
            analyze_request(&req),
            Err(LoanCalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_strict_request_reports_overflow() {
        let req = LoanRequest {
            loan: RawLoanInput::new(1000, 1_000_000, 1200),
            policy: InputPolicy::Strict,
            include_schedule: false,
        };
        assert!(matches!(
            analyze_request(&req),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_strict_summary_reports_overflow() {
        let req = LoanRequest {
            loan: RawLoanInput::new(1000, 1_000_000, 1200),
            policy: InputPolicy::Strict,
            include_schedule: false,
        };
        assert!(matches!(
            summarize_request(&req),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_tolerant_summary_overflow_is_zero() {
        let req = LoanRequest {
            loan: RawLoanInput::new(1000, 1_000_000, 1200),
            ..LoanRequest::default()
        };
        assert!(summarize_request(&req).unwrap().is_zero());
    }

    #[test]
    fn test_summary_matches_analysis() {
        let req = LoanRequest {
            loan: RawLoanInput::new("500000", "12", "24"),
            policy: InputPolicy::Strict,
            include_schedule: false,
        };
        let summary = summarize_request(&req).unwrap();
        assert_eq!(summary, analyze_request(&req).unwrap().result.summary);
    }
}
