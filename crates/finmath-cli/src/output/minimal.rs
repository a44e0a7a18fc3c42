use serde_json::Value;

/// Print just the answer to the problem.
///
/// Unwraps the computation envelope (or an analysis report's
/// `financial_data`), then prints the field the problem asked for.
pub fn print_minimal(value: &Value) {
    let result_obj = unwrap_result(value);

    if let Some(answer) = answer_for_target(result_obj) {
        println!("{}", format_minimal(answer));
        return;
    }

    // Priority list of key output fields
    let priority_keys = [
        "x", "result", "amount", "capital", "interest", "rate", "human", "periods", "message",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn unwrap_result(value: &Value) -> &Value {
    let inner = value.get("financial_data").filter(|v| !v.is_null()).unwrap_or(value);
    inner.get("result").unwrap_or(inner)
}

/// Simple-interest results name their unknown in `target`; pick the matching field.
fn answer_for_target(result: &Value) -> Option<&Value> {
    let target = result.get("target")?.as_str()?;
    match target {
        "rate" => result.pointer("/computed_rate/label"),
        "time" => result.pointer("/computed_time/human"),
        "capital" | "amount" | "interest" => result.get("summary")?.get(target),
        _ => None,
    }
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
