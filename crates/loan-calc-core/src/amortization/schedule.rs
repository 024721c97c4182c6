use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{level_payment, nominal_monthly_rate};
use crate::types::{Money, Percent, Rate};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Headline figures for a fixed-payment loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Level payment due every month
    pub monthly_payment: Money,
    /// monthly_payment * term_months
    pub total_paid: Money,
    /// total_paid - principal
    pub total_interest: Money,
    /// Nominal monthly rate as a decimal (0.01 = 1%)
    pub monthly_rate: Rate,
}

impl PaymentSummary {
    /// The summary returned for incomplete or degenerate input.
    pub fn zero() -> Self {
        PaymentSummary {
            monthly_payment: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            monthly_rate: Decimal::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.monthly_payment.is_zero()
            && self.total_paid.is_zero()
            && self.total_interest.is_zero()
            && self.monthly_rate.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the level monthly payment and loan totals.
///
/// Zero or negative principal, a zero term, or a negative rate yields
/// [`PaymentSummary::zero`]. A zero rate amortizes straight-line. Values too
/// large for Decimal arithmetic also collapse to the zero summary.
pub fn compute_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> PaymentSummary {
    if principal <= Decimal::ZERO || term_months == 0 || annual_rate_pct < Decimal::ZERO {
        log::debug!(
            "degenerate loan input (principal={principal}, rate={annual_rate_pct}%, term={term_months}); returning zero summary"
        );
        return PaymentSummary::zero();
    }

    let monthly_rate = nominal_monthly_rate(annual_rate_pct);

    let Some(monthly_payment) = level_payment(monthly_rate, term_months, principal) else {
        log::warn!(
            "payment overflow for principal={principal}, rate={annual_rate_pct}%, term={term_months}; returning zero summary"
        );
        return PaymentSummary::zero();
    };

    let Some(total_paid) = monthly_payment.checked_mul(Decimal::from(term_months)) else {
        log::warn!("total paid overflow for payment={monthly_payment}, term={term_months}");
        return PaymentSummary::zero();
    };

    PaymentSummary {
        monthly_payment,
        total_paid,
        total_interest: total_paid - principal,
        monthly_rate,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn approx(actual: Decimal, expected: Decimal) -> bool {
        (actual - expected).abs() < dec!(0.01)
    }

    #[test]
    fn test_standard_loan() {
        let s = compute_schedule(dec!(500000), dec!(12), 24);
        assert_eq!(s.monthly_rate, dec!(0.01));
        assert!(approx(s.monthly_payment, dec!(23536.74)), "{}", s.monthly_payment);
        assert!(approx(s.total_paid, dec!(564881.67)), "{}", s.total_paid);
        assert!(approx(s.total_interest, dec!(64881.67)), "{}", s.total_interest);
    }

    #[test]
    fn test_total_paid_is_payment_times_term() {
        let s = compute_schedule(dec!(250000), dec!(7.5), 360);
        assert_eq!(s.total_paid, s.monthly_payment * dec!(360));
        assert_eq!(s.total_interest, s.total_paid - dec!(250000));
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let s = compute_schedule(dec!(120000), Decimal::ZERO, 12);
        assert_eq!(s.monthly_payment, dec!(10000));
        assert_eq!(s.total_paid, dec!(120000));
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.monthly_rate, Decimal::ZERO);
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(compute_schedule(Decimal::ZERO, dec!(12), 24), PaymentSummary::zero());
    }

    #[test]
    fn test_negative_principal() {
        assert!(compute_schedule(dec!(-1000), dec!(12), 24).is_zero());
    }

    #[test]
    fn test_zero_term() {
        assert!(compute_schedule(dec!(500000), dec!(12), 0).is_zero());
    }

    #[test]
    fn test_negative_rate() {
        assert!(compute_schedule(dec!(500000), dec!(-1), 24).is_zero());
    }

    #[test]
    fn test_overflow_collapses_to_zero() {
        assert!(compute_schedule(dec!(1000), dec!(1000000), 1200).is_zero());
    }

    #[test]
    fn test_single_period_loan() {
        let s = compute_schedule(dec!(1000), dec!(12), 1);
        // One month at 1%: repay principal plus one month of interest
        assert_eq!(s.monthly_payment, dec!(1010));
        assert_eq!(s.total_interest, dec!(10));
    }
}
