use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Fields rendered as currency amounts.
const MONEY_FIELDS: [&str; 8] = [
    "principal",
    "monthly_payment",
    "total_paid",
    "total_interest",
    "payment",
    "principal_portion",
    "interest_portion",
    "remaining_balance",
];

/// Fields holding a decimal rate (0.01 = 1%).
const RATE_FIELDS: [&str; 1] = ["monthly_rate"];

/// Render a JSON field for humans: money as `RD$1,234.56`, rates as
/// percentages, anything else untouched.
pub fn format_field(key: &str, value: &Value, currency: &str) -> Option<String> {
    let amount = as_decimal(value)?;
    if MONEY_FIELDS.contains(&key) {
        Some(format_money(amount, currency))
    } else if RATE_FIELDS.contains(&key) {
        Some(format_rate(amount))
    } else {
        None
    }
}

/// Currency symbol, thousands separators, two decimals, half away from zero.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}{currency}{}.{frac}", group_thousands(whole))
}

/// Monthly decimal rate as a percentage with four decimals.
pub fn format_rate(rate: Decimal) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.4}%")
}

fn group_thousands(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}
