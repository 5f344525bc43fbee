//! Defensive coercion for the list-valued meal columns.
//!
//! Legacy rows may hold `ingredients`, `preparation`, or `tags` as a JSON
//! string containing an encoded array instead of a real array. Every reader
//! goes through this module so the leniency is identical everywhere: a value
//! that is neither an array nor a string encoding one degrades to an empty
//! sequence, never an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::model::Ingredient;

fn coerce<T: DeserializeOwned>(raw: &Value) -> Vec<T> {
    let value = match raw {
        Value::Array(_) => raw.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ Value::Array(_)) => parsed,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    serde_json::from_value(value).unwrap_or_default()
}

/// Coerces a stored `ingredients` value into an ordered list of pairs.
pub fn normalize_ingredients(raw: &Value) -> Vec<Ingredient> {
    coerce(raw)
}

/// Coerces a stored `preparation` value into an ordered list of steps.
pub fn normalize_steps(raw: &Value) -> Vec<String> {
    coerce(raw)
}

/// Coerces a stored `tags` value into an ordered list of tags.
pub fn normalize_tags(raw: &Value) -> Vec<String> {
    coerce(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_array_passes_through() {
        let raw = json!([{"name": "Flour", "amount": "200g"}]);
        let out = normalize_ingredients(&raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Flour");
        assert_eq!(out[0].amount, "200g");
    }

    #[test]
    fn string_encoded_array_matches_native() {
        let native = json!([{"name": "Salt", "amount": "1 tsp"}, {"name": "Egg", "amount": "2"}]);
        let encoded = Value::String(native.to_string());
        assert_eq!(
            normalize_ingredients(&encoded),
            normalize_ingredients(&native)
        );
    }

    #[test]
    fn unparseable_string_degrades_to_empty() {
        let raw = Value::String("not json".into());
        assert!(normalize_ingredients(&raw).is_empty());
        assert!(normalize_steps(&raw).is_empty());
        assert!(normalize_tags(&raw).is_empty());
    }

    #[test]
    fn non_array_values_degrade_to_empty() {
        for raw in [json!(null), json!(42), json!({"a": 1}), json!(true)] {
            assert!(normalize_steps(&raw).is_empty());
            assert!(normalize_ingredients(&raw).is_empty());
        }
        // a string encoding a non-array is still not an array
        assert!(normalize_tags(&Value::String("{\"a\":1}".into())).is_empty());
    }

    #[test]
    fn step_order_is_preserved() {
        let raw = json!(["Boil water", "Add pasta", "Drain"]);
        assert_eq!(
            normalize_steps(&raw),
            vec!["Boil water", "Add pasta", "Drain"]
        );
    }

    #[test]
    fn array_with_wrong_element_shape_degrades_to_empty() {
        let raw = json!([1, 2, 3]);
        assert!(normalize_ingredients(&raw).is_empty());
    }
}
