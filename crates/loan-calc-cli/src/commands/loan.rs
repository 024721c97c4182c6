use clap::Args;
use serde_json::Value;

use loan_calc_core::amortization::{analyze_request, InputPolicy, LoanRequest, RawLoanInput};

use crate::input;

const DEFAULT_PRINCIPAL: &str = "500000";
const DEFAULT_RATE: &str = "12";
const DEFAULT_TERM: &str = "24";

/// Loan terms shared by every loan subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON request file ({"principal", "annual_rate_pct", "term_months", ...})
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed [default: 500000]
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<String>,

    /// Nominal annual interest rate in percent, e.g. 12 for 12% [default: 12]
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<String>,

    /// Term in months [default: 24]
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<String>,

    /// Reject malformed or non-positive input instead of returning zeros
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the combined summary + schedule view
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Include the month-by-month amortization table
    #[arg(long)]
    pub show_table: bool,
}

/// Build the request from (in order) an input file, explicit flags, piped
/// stdin, or the built-in defaults.
fn resolve_request(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let mut request = if let Some(ref path) = args.input {
        input::file::read_request(path)?
    } else if args.principal.is_some() || args.rate.is_some() || args.term.is_some() {
        flag_request(args)
    } else if let Some(request) = input::stdin::read_request()? {
        request
    } else {
        flag_request(args)
    };

    if args.strict {
        request.policy = InputPolicy::Strict;
    }
    Ok(request)
}

fn flag_request(args: &LoanArgs) -> LoanRequest {
    LoanRequest {
        loan: RawLoanInput::new(
            args.principal.as_deref().unwrap_or(DEFAULT_PRINCIPAL),
            args.rate.as_deref().unwrap_or(DEFAULT_RATE),
            args.term.as_deref().unwrap_or(DEFAULT_TERM),
        ),
        ..LoanRequest::default()
    }
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request = resolve_request(&args)?;
    request.include_schedule = false;
    let result = analyze_request(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request = resolve_request(&args)?;
    request.include_schedule = true;
    let rows = analyze_request(&request)?.result.schedule.unwrap_or_default();
    log::debug!("built {} amortization rows", rows.len());
    Ok(serde_json::to_value(rows)?)
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request = resolve_request(&args.loan)?;
    request.include_schedule = request.include_schedule || args.show_table;
    let result = analyze_request(&request)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn flags(principal: Option<&str>, rate: Option<&str>, term: Option<&str>) -> LoanArgs {
        LoanArgs {
            input: None,
            principal: principal.map(String::from),
            rate: rate.map(String::from),
            term: term.map(String::from),
            strict: false,
        }
    }

    #[test]
    fn test_partial_flags_fill_defaults() {
        let req = flag_request(&flags(Some("1000"), None, None));
        assert_eq!(req.loan.principal, Value::from("1000"));
        assert_eq!(req.loan.annual_rate_pct, Value::from(DEFAULT_RATE));
        assert_eq!(req.loan.term_months, Value::from(DEFAULT_TERM));
        assert_eq!(req.policy, InputPolicy::Tolerant);
    }

    #[test]
    fn test_strict_flag_sets_policy() {
        let mut args = flags(Some("0"), Some("12"), Some("24"));
        args.strict = true;
        assert!(run_summary(args).is_err());
    }

    #[test]
    fn test_schedule_from_flags() {
        let value = run_schedule(flags(Some("120000"), Some("0"), Some("12"))).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 12);
        let first: Decimal = rows[0]["principal_portion"].as_str().unwrap().parse().unwrap();
        assert_eq!(first, dec!(10000));
    }
}
