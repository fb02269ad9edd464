use serde_json::Value;

use super::scalar;

/// Print just the key answer value from the output.
///
/// Looks for the headline tax figures first, then falls back to the first
/// field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "total_tax",
        "taxable_income",
        "corporate_tax",
        "basic_tax",
        "effective_tax_rate",
        "effective_rate",
        "book_review_rate",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar(val));
            return;
        }
    }

    println!("{}", scalar(result_obj));
}
