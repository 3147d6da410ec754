use serde_json::Value;
use std::io;

use super::{cell, result_rows};

/// Write output as CSV to stdout.
///
/// Row-shaped results (schedule, projection, comparison) become one CSV row
/// per entry; everything else is a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = result_rows(value) {
        write_rows(&mut wtr, rows);
    } else {
        let fields = value
            .get("result")
            .and_then(Value::as_object)
            .or_else(|| value.as_object());
        match fields {
            Some(map) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &cell(val)]);
                }
            }
            None => {
                let _ = wtr.write_record([&cell(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
