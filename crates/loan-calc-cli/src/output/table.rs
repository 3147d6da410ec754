use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, result_rows};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            print_fields(result);
            if let Some(rows) = result_rows(value) {
                println!();
                print_rows(rows);
            }
        }
        Some(other) => println!("{}", cell(other)),
        None => print_fields(envelope),
    }

    if let Some(Value::Object(inputs)) = envelope.get("inputs") {
        println!("\nInputs:");
        print_fields(inputs);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalar fields as a Field/Value table; row arrays are printed separately.
fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if key == "rows" {
            continue;
        }
        let shown = match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                format!("{} entries", items.len())
            }
            _ => cell(val),
        };
        builder.push_record([key.as_str(), shown.as_str()]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}
