use serde_json::Value;

/// Result fields worth printing on their own, most important first.
const PRIORITY_KEYS: [&str; 3] = ["monthly_payment", "total_paid", "total_interest"];

/// Print just the monthly payment (or the nearest headline figure).
///
/// Looks in the result envelope, then inside its `summary` section. A bare
/// schedule array prints the payment of its first row.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(found) = headline(result_obj) {
        println!("{}", format_minimal(found));
        return;
    }

    if let Value::Array(rows) = result_obj {
        match rows.first().and_then(|r| r.get("payment")) {
            Some(payment) => println!("{}", format_minimal(payment)),
            None => println!("0"),
        }
        return;
    }

    println!("{}", format_minimal(result_obj));
}

fn headline(result: &Value) -> Option<&Value> {
    let sections = [Some(result), result.get("summary")];
    for section in sections.into_iter().flatten() {
        for key in PRIORITY_KEYS {
            if let Some(val) = section.get(key) {
                if !val.is_null() {
                    return Some(val);
                }
            }
        }
    }
    None
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
