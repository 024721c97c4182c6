//! Loan input records and the coercion rules that turn loosely typed values
//! (form fields, JSON documents, command-line text) into a [`LoanInput`].
//!
//! Two policies are supported. The tolerant policy never fails: anything
//! malformed becomes an all-zero input, which the engine answers with a zero
//! summary and an empty table. The strict policy reports the offending field
//! as [`LoanCalcError::InvalidInput`].

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LoanCalcError;
use crate::types::{Money, Percent};
use crate::LoanCalcResult;

/// Longest term accepted (100 years). Strict validation rejects longer
/// terms; tolerant coercion treats them as malformed.
pub const MAX_TERM_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A typed loan snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate in percent (12 = 12%)
    pub annual_rate_pct: Percent,
    /// Number of monthly payments
    pub term_months: u32,
}

/// How malformed or degenerate input is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Coerce to the zero result, never fail.
    #[default]
    Tolerant,
    /// Reject with a field-level error.
    Strict,
}

/// Loan fields exactly as supplied, before any coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLoanInput {
    #[serde(default)]
    pub principal: Value,
    #[serde(default, alias = "rate")]
    pub annual_rate_pct: Value,
    #[serde(default, alias = "term")]
    pub term_months: Value,
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Convert a loose value to a number the way a browser's `Number(x)` does.
///
/// Null, empty and whitespace-only strings are 0, booleans are 0 or 1, numeric
/// text (plain or scientific) parses. Anything else is not a number and
/// yields `None`.
pub fn coerce_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => Some(Decimal::ZERO),
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::Number(n) => parse_decimal_text(&n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal_text(trimmed)
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    // Decimal accepts `1_000`; Number() does not
    if text.contains('_') {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Whole, non-negative month counts only.
fn to_term_months(value: Decimal) -> Option<u32> {
    if !value.fract().is_zero() || value < Decimal::ZERO {
        return None;
    }
    value.to_u32()
}

impl RawLoanInput {
    pub fn new(
        principal: impl Into<Value>,
        annual_rate_pct: impl Into<Value>,
        term_months: impl Into<Value>,
    ) -> Self {
        RawLoanInput {
            principal: principal.into(),
            annual_rate_pct: annual_rate_pct.into(),
            term_months: term_months.into(),
        }
    }

    /// Tolerant coercion. Any field that is not a number (or a term that is
    /// not a whole month count up to [`MAX_TERM_MONTHS`]) turns the whole
    /// input into `LoanInput::default()`.
    pub fn coerce(&self) -> LoanInput {
        let principal = coerce_number(&self.principal);
        let rate = coerce_number(&self.annual_rate_pct);
        let term = coerce_number(&self.term_months)
            .and_then(to_term_months)
            .filter(|months| *months <= MAX_TERM_MONTHS);

        match (principal, rate, term) {
            (Some(principal), Some(annual_rate_pct), Some(term_months)) => LoanInput {
                principal,
                annual_rate_pct,
                term_months,
            },
            _ => {
                log::debug!("malformed loan input {:?}; coercing to zero input", self);
                LoanInput::default()
            }
        }
    }

    /// Strict conversion: every field must be numeric and the resulting
    /// input must pass [`LoanInput::validate`].
    pub fn validate(&self) -> LoanCalcResult<LoanInput> {
        let principal = coerce_number(&self.principal)
            .ok_or_else(|| not_a_number("principal", &self.principal))?;
        let annual_rate_pct = coerce_number(&self.annual_rate_pct)
            .ok_or_else(|| not_a_number("annual_rate_pct", &self.annual_rate_pct))?;
        let term = coerce_number(&self.term_months)
            .ok_or_else(|| not_a_number("term_months", &self.term_months))?;
        let term_months = to_term_months(term).ok_or_else(|| LoanCalcError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Term must be a whole number of months, got {term}"),
        })?;

        let input = LoanInput {
            principal,
            annual_rate_pct,
            term_months,
        };
        input.validate()?;
        Ok(input)
    }

    /// Apply the given policy.
    pub fn resolve(&self, policy: InputPolicy) -> LoanCalcResult<LoanInput> {
        match policy {
            InputPolicy::Tolerant => Ok(self.coerce()),
            InputPolicy::Strict => self.validate(),
        }
    }
}

fn not_a_number(field: &str, value: &Value) -> LoanCalcError {
    LoanCalcError::InvalidInput {
        field: field.into(),
        reason: format!("Expected a number, got {value}"),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl LoanInput {
    pub fn new(principal: Money, annual_rate_pct: Percent, term_months: u32) -> Self {
        LoanInput {
            principal,
            annual_rate_pct,
            term_months,
        }
    }

    /// True when the engine would answer with the zero result.
    pub fn is_degenerate(&self) -> bool {
        self.principal <= Decimal::ZERO
            || self.term_months == 0
            || self.annual_rate_pct < Decimal::ZERO
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
        if self.term_months == 0 {
            return Err(LoanCalcError::InvalidInput {
                field: "term_months".into(),
                reason: "Term must be at least one month".into(),
            });
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(LoanCalcError::InvalidInput {
                field: "term_months".into(),
                reason: format!("Term cannot exceed {MAX_TERM_MONTHS} months"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_coerce_number_like_browser() {
        assert_eq!(coerce_number(&json!(null)), Some(Decimal::ZERO));
        assert_eq!(coerce_number(&json!("")), Some(Decimal::ZERO));
        assert_eq!(coerce_number(&json!("   ")), Some(Decimal::ZERO));
        assert_eq!(coerce_number(&json!(true)), Some(Decimal::ONE));
        assert_eq!(coerce_number(&json!(" 500000 ")), Some(dec!(500000)));
        assert_eq!(coerce_number(&json!("12.5")), Some(dec!(12.5)));
        assert_eq!(coerce_number(&json!("1e3")), Some(dec!(1000)));
        assert_eq!(coerce_number(&json!(24)), Some(dec!(24)));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!("1_000")), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({"a": 1})), None);
    }

    #[test]
    fn test_coerce_well_formed() {
        let raw = RawLoanInput::new("500000", 12, "24");
        assert_eq!(raw.coerce(), LoanInput::new(dec!(500000), dec!(12), 24));
    }

    #[test]
    fn test_coerce_malformed_is_zero_input() {
        let raw = RawLoanInput::new("500000", "twelve", 24);
        assert_eq!(raw.coerce(), LoanInput::default());
        assert!(raw.coerce().is_degenerate());
    }

    #[test]
    fn test_coerce_fractional_term_is_zero_input() {
        let raw = RawLoanInput::new(1000, 5, 24.5);
        assert_eq!(raw.coerce(), LoanInput::default());
    }

    #[test]
    fn test_coerce_oversized_term_is_zero_input() {
        let raw = RawLoanInput::new(500000, 0, "4000000000");
        assert_eq!(raw.coerce(), LoanInput::default());

        let longest = RawLoanInput::new(500000, 0, MAX_TERM_MONTHS);
        assert_eq!(longest.coerce().term_months, MAX_TERM_MONTHS);
    }

    #[test]
    fn test_coerce_underscore_separators_is_zero_input() {
        let raw = RawLoanInput::new("1_000", 12, 24);
        assert_eq!(raw.coerce(), LoanInput::default());
    }

    #[test]
    fn test_coerce_empty_fields() {
        let raw = RawLoanInput::new("", "", "");
        assert_eq!(raw.coerce(), LoanInput::default());
    }

    #[test]
    fn test_strict_rejects_non_numeric() {
        let raw = RawLoanInput::new("lots", 12, 24);
        match raw.validate() {
            Err(LoanCalcError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_fractional_term() {
        let raw = RawLoanInput::new(1000, 5, "12.5");
        match raw.validate() {
            Err(LoanCalcError::InvalidInput { field, .. }) => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_degenerate_values() {
        assert!(LoanInput::new(Decimal::ZERO, dec!(12), 24).validate().is_err());
        assert!(LoanInput::new(dec!(1000), dec!(-0.5), 24).validate().is_err());
        assert!(LoanInput::new(dec!(1000), dec!(12), 0).validate().is_err());
        assert!(LoanInput::new(dec!(1000), dec!(12), MAX_TERM_MONTHS + 1)
            .validate()
            .is_err());
        assert!(LoanInput::new(dec!(1000), Decimal::ZERO, 12).validate().is_ok());
    }

    #[test]
    fn test_resolve_dispatches_on_policy() {
        let raw = RawLoanInput::new(0, 12, 24);
        assert_eq!(
            raw.resolve(InputPolicy::Tolerant).unwrap(),
            LoanInput::new(Decimal::ZERO, dec!(12), 24)
        );
        assert!(raw.resolve(InputPolicy::Strict).is_err());
    }

    #[test]
    fn test_raw_input_deserializes_with_aliases() {
        let raw: RawLoanInput =
            serde_json::from_str(r#"{"principal": "1000", "rate": 6, "term": 12}"#).unwrap();
        assert_eq!(raw.coerce(), LoanInput::new(dec!(1000), dec!(6), 12));
    }
}
