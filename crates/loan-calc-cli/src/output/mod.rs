pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Row-shaped data inside a result: schedules, projections, comparisons.
pub(crate) fn result_rows(value: &Value) -> Option<&Vec<Value>> {
    match value.get("result")?.get("rows")? {
        Value::Array(rows) => Some(rows),
        _ => None,
    }
}

/// Render a scalar for a table cell or CSV field.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_rows_found() {
        let v = json!({"result": {"rows": [{"month": 1}]}});
        assert_eq!(result_rows(&v).map(|r| r.len()), Some(1));
        assert!(result_rows(&json!({"result": {"emi": "1"}})).is_none());
    }

    #[test]
    fn test_cell_formats() {
        assert_eq!(cell(&json!("8678.23")), "8678.23");
        assert_eq!(cell(&json!(null)), "");
        assert_eq!(cell(&json!([1, 2])), "1, 2");
    }
}
