use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar and nested-object fields go in one Field/Value table with dotted
/// keys; arrays of records (debt and payment breakdowns) get their own table.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    if let Some(Value::Object(result)) = map.get("result") {
        print_result_table(result);
        print_envelope_notes(map);
    } else if let Some(Value::Object(data)) = map.get("financial_data") {
        // Analysis report: header fields, then the wrapped solution.
        let header: Map<String, Value> = map
            .iter()
            .filter(|(k, _)| k.as_str() != "financial_data")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        print_result_table(&header);
        print_table(&Value::Object(data.clone()));
    } else {
        print_result_table(map);
    }
}

fn print_result_table(result: &Map<String, Value>) {
    let mut rows = Vec::new();
    let mut sections = Vec::new();
    flatten("", result, &mut rows, &mut sections);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));

    for (title, records) in sections {
        println!("\n{}:", title);
        print_records(records);
    }
}

fn flatten<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    rows: &mut Vec<(String, String)>,
    sections: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten(&path, inner, rows, sections),
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                sections.push((path, items.as_slice()))
            }
            _ => rows.push((path, format_value(val))),
        }
    }
}

/// One row per record; the header is the union of keys in first-seen order.
fn print_records(records: &[Value]) {
    let mut headers: Vec<&str> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !headers.contains(&key.as_str()) {
                    headers.push(key);
                }
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(*h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
