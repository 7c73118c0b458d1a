//! Structured data conversions: YAML and CSV to and from JSON.

use serde_json::{Map, Value};
use toolbox_model::{Mode, Result, ToolError};

/// Encode: YAML to pretty JSON. Decode: JSON to YAML.
pub fn yaml_json(input: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Encode => {
            let value: Value =
                serde_yaml::from_str(input).map_err(|e| ToolError::validation("Invalid YAML", e))?;
            serde_json::to_string_pretty(&value).map_err(|e| ToolError::failed("Invalid YAML", e))
        }
        Mode::Decode => {
            let value: Value =
                serde_json::from_str(input).map_err(|e| ToolError::validation("Invalid JSON", e))?;
            serde_yaml::to_string(&value).map_err(|e| ToolError::failed("Invalid JSON", e))
        }
    }
}

/// Encode: CSV with a header row to a JSON array of objects (all values are
/// strings). Decode: a JSON array of objects to CSV.
pub fn csv_json(input: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Encode => csv_to_json(input),
        Mode::Decode => json_to_csv(input),
    }
}

fn csv_to_json(input: &str) -> Result<String> {
    let invalid = |e: csv::Error| ToolError::validation("Invalid CSV", e);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.trim().as_bytes());
    let headers = reader.headers().map_err(invalid)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(invalid)?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), Value::String(value.to_string())))
            .collect();
        rows.push(Value::Object(row));
    }
    serde_json::to_string_pretty(&Value::Array(rows)).map_err(|e| ToolError::failed("Invalid CSV", e))
}

fn json_to_csv(input: &str) -> Result<String> {
    let invalid = |message: String| ToolError::validation("Invalid JSON", message);
    let value: Value = serde_json::from_str(input).map_err(|e| invalid(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(invalid("expected an array of objects".to_string()));
    };

    // Columns in first-seen order across all rows.
    let mut columns: Vec<String> = Vec::new();
    for item in &items {
        let Value::Object(fields) = item else {
            return Err(invalid("expected an array of objects".to_string()));
        };
        for key in fields.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if !columns.is_empty() {
        writer
            .write_record(&columns)
            .map_err(|e| invalid(e.to_string()))?;
    }
    for item in &items {
        let record: Vec<String> = columns
            .iter()
            .map(|column| item.get(column).map(cell).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| invalid(e.to_string()))?;
    }
    let bytes = writer.into_inner().map_err(|e| invalid(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| invalid(e.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn yaml_to_json_and_back() {
        let json = yaml_json("name: John\nage: 30\nhobbies:\n  - reading\n", Mode::Encode).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "name": "John",
          "age": 30,
          "hobbies": [
            "reading"
          ]
        }
        "#);
        let yaml = yaml_json(&json, Mode::Decode).unwrap();
        assert_eq!(yaml, "name: John\nage: 30\nhobbies:\n- reading\n");
    }

    #[test]
    fn conversion_errors_name_the_source_format() {
        assert!(
            yaml_json("a: [", Mode::Encode)
                .unwrap_err()
                .to_string()
                .starts_with("Invalid YAML: ")
        );
        assert!(
            yaml_json("{", Mode::Decode)
                .unwrap_err()
                .to_string()
                .starts_with("Invalid JSON: ")
        );
    }

    #[test]
    fn csv_rows_become_string_objects() {
        let json = csv_json("name,age\nJohn,30\nJane,25", Mode::Encode).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"name": "John", "age": "30"}, {"name": "Jane", "age": "25"}])
        );
    }

    #[test]
    fn json_objects_become_csv() {
        let csv = csv_json(
            r#"[{"name": "John", "age": 30}, {"name": "Jane, Jr.", "city": null}]"#,
            Mode::Decode,
        )
        .unwrap();
        assert_eq!(csv, "name,age,city\nJohn,30,\n\"Jane, Jr.\",,");
        assert!(csv_json(r#"{"a": 1}"#, Mode::Decode).is_err());
    }

    proptest! {
        #[test]
        fn json_survives_yaml_round_trip(
            object in proptest::collection::btree_map("k[a-z]{0,7}", -1000i64..1000, 0..6)
        ) {
            let value = serde_json::to_value(&object).unwrap();
            let yaml = yaml_json(&value.to_string(), Mode::Decode).unwrap();
            let back: Value = serde_json::from_str(&yaml_json(&yaml, Mode::Encode).unwrap()).unwrap();
            prop_assert_eq!(back, value);
        }
    }
}
