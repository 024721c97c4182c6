use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::money;

/// Format output as tables using the tabled crate.
///
/// The result envelope prints one table per section (`input`, `summary`,
/// `schedule`), followed by warnings and methodology.
pub fn print_table(value: &Value, currency: &str) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result, map, currency);
            } else {
                print_flat_object(map, currency);
            }
        }
        Value::Array(arr) => print_array_table(arr, currency),
        _ => println!("{value}"),
    }
}

fn print_result_tables(result: &Value, envelope: &Map<String, Value>, currency: &str) {
    match result {
        Value::Object(res_map) => {
            let mut scalars = Map::new();
            for (key, val) in res_map {
                match val {
                    Value::Object(section) => {
                        println!("{}", heading(key));
                        print_flat_object(section, currency);
                    }
                    Value::Array(rows) => {
                        println!("{}", heading(key));
                        print_array_table(rows, currency);
                    }
                    _ => {
                        scalars.insert(key.clone(), val.clone());
                    }
                }
            }
            if !scalars.is_empty() {
                print_flat_object(&scalars, currency);
            }
        }
        Value::Array(rows) => print_array_table(rows, currency),
        _ => print_flat_object(envelope, currency),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn heading(key: &str) -> String {
    let mut title = key.replace('_', " ");
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("\n{title}")
}

fn print_flat_object(map: &Map<String, Value>, currency: &str) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_cell(key, val, currency)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value], currency: &str) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_cell(h, v, currency))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_cell(key: &str, value: &Value, currency: &str) -> String {
    money::format_field(key, value, currency).unwrap_or_else(|| format_value(value))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading() {
        assert_eq!(heading("schedule"), "\nSchedule");
        assert_eq!(heading("loan_summary"), "\nLoan summary");
    }

    #[test]
    fn test_format_cell_uses_currency_for_money() {
        assert_eq!(format_cell("total_paid", &json!("564881.666"), "RD$"), "RD$564,881.67");
        assert_eq!(format_cell("period", &json!(7), "RD$"), "7");
        assert_eq!(format_cell("term_months", &json!(24), "RD$"), "24");
    }
}
