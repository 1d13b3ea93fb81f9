use serde_json::Value;

/// Recursively replaces non-finite numbers with `null`, leaving every
/// other leaf and the surrounding structure (nesting, key order) intact.
///
/// Stock `serde_json` cannot hold NaN or infinity inside a `Number`, so a
/// `NaN` token in an upstream body already fails at parse time and takes
/// the fetch fallback path; the number guard here keeps the walk total and
/// covers values produced by lenient parser configurations.
pub fn scrub(value: Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(b),
        Value::String(s) => Value::String(s),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => Value::Null,
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(scrub).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key, scrub(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finite_leaves_pass_through_unchanged() {
        let value = json!({
            "name": "Westfield Primary",
            "distance": 431.5,
            "in_catchment": true,
            "rank": 12,
            "notes": null,
        });
        assert_eq!(scrub(value.clone()), value);
    }

    #[test]
    fn test_structure_and_key_order_preserved() {
        let value = json!({
            "z_first": [1, 2, { "nested": [3.5, "x"] }],
            "a_second": { "inner": [null, true] },
        });
        let scrubbed = scrub(value.clone());
        // Key order round-trips through serialization untouched
        assert_eq!(
            serde_json::to_string(&scrubbed).unwrap(),
            serde_json::to_string(&value).unwrap()
        );
    }

    #[test]
    fn test_idempotent() {
        let value = json!([
            { "distance": 250.0, "tags": ["a", "b"] },
            { "distance": null },
            42,
        ]);
        let once = scrub(value);
        let twice = scrub(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(scrub(json!([])), json!([]));
        assert_eq!(scrub(json!({})), json!({}));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(scrub(json!(null)), json!(null));
        assert_eq!(scrub(json!(false)), json!(false));
        assert_eq!(scrub(json!("NaN")), json!("NaN")); // the string, not the float
        assert_eq!(scrub(json!(-7)), json!(-7));
        assert_eq!(scrub(json!(0.25)), json!(0.25));
    }
}
