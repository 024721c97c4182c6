use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT_DIVISOR: Decimal = dec!(100);

/// Nominal monthly rate from an annual percentage: 12 -> 0.01.
///
/// This is a straight division, not an effective-rate conversion.
pub fn nominal_monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / MONTHS_PER_YEAR / PERCENT_DIVISOR
}

/// Compound growth factor (1 + rate)^nper. `None` when the result does not
/// fit in a Decimal.
pub fn growth_factor(rate: Rate, nper: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powi(i64::from(nper))
}

/// Level payment that fully amortizes `principal` over `nper` periods.
///
/// Zero rate falls back to straight-line `principal / nper`. Returns `None`
/// for `nper == 0` or when an intermediate value overflows.
pub fn level_payment(rate: Rate, nper: u32, principal: Money) -> Option<Money> {
    if nper == 0 {
        return None;
    }
    let periods = Decimal::from(nper);

    if rate.is_zero() {
        return principal.checked_div(periods);
    }

    let factor = growth_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;

    // 1 + r rounds to 1 for rates below Decimal resolution
    if denominator.is_zero() {
        return principal.checked_div(periods);
    }

    let annuity = rate.checked_mul(factor)?.checked_div(denominator)?;
    principal.checked_mul(annuity)
}
