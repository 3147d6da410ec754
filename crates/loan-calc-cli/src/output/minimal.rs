use serde_json::Value;

use super::cell;

/// Print just the key answer value from the output.
///
/// Looks for the headline field of each command in priority order, then
/// falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "emi",
        "eligible_loan_amount",
        "loan_amount",
        "Emi",
        "Eligibility",
        "LoanAmount",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            match map.get(*key) {
                // Mode results are wrapped in their variant name
                Some(Value::Object(inner)) => {
                    if let Some(v) = ["emi", "eligible_loan_amount", "loan_amount"]
                        .iter()
                        .find_map(|k| inner.get(*k))
                    {
                        println!("{}", cell(v));
                        return;
                    }
                }
                Some(val) if !val.is_null() => {
                    println!("{}", cell(val));
                    return;
                }
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    println!("{}", cell(result_obj));
}
