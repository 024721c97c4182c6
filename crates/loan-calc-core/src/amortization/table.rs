use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::input::MAX_TERM_MONTHS;
use crate::types::{Money, Rate};

/// Remaining balances smaller than this are reported as exactly zero.
pub const BALANCE_CLAMP_THRESHOLD: Decimal = dec!(0.01);

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// 1-based month number
    pub period: u32,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// Simulate month-by-month balance reduction under a level payment.
///
/// Returns an empty schedule when principal or term is zero, when the
/// payment is not positive, or when a period overflows Decimal arithmetic.
/// The final period retires whatever balance is left, so the last row always
/// ends at zero regardless of rounding drift in `monthly_payment`.
pub fn build_amortization_table(
    principal: Money,
    term_months: u32,
    monthly_rate: Rate,
    monthly_payment: Money,
) -> Vec<PeriodRow> {
    if principal <= Decimal::ZERO || term_months == 0 || monthly_payment <= Decimal::ZERO {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(term_months.min(MAX_TERM_MONTHS) as usize);
    let mut balance = principal;

    for period in 1..=term_months {
        let Some((row, new_balance)) =
            amortize_period(period, term_months, balance, monthly_rate, monthly_payment)
        else {
            log::warn!(
                "amortization overflow at period {period} (principal={principal}, rate={monthly_rate}, payment={monthly_payment}); returning empty schedule"
            );
            return Vec::new();
        };

        rows.push(row);
        balance = new_balance;
    }

    rows
}

/// One period's row plus the unclamped balance carried forward.
fn amortize_period(
    period: u32,
    term_months: u32,
    balance: Money,
    monthly_rate: Rate,
    monthly_payment: Money,
) -> Option<(PeriodRow, Money)> {
    let interest_portion = monthly_rate.checked_mul(balance)?;
    let principal_portion = if period == term_months {
        balance
    } else {
        monthly_payment.checked_sub(interest_portion)?
    };
    let new_balance = balance.checked_sub(principal_portion)?;

    let row = PeriodRow {
        period,
        payment: monthly_payment,
        principal_portion,
        interest_portion,
        remaining_balance: clamp_balance(new_balance),
    };
    Some((row, new_balance))
}

fn clamp_balance(balance: Money) -> Money {
    if balance.abs() < BALANCE_CLAMP_THRESHOLD {
        Decimal::ZERO
    } else {
        balance
    }
}
