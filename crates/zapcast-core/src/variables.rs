// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template variable resolution.
//!
//! Builds the provider-ready substitution map for one contact from the
//! session's static variables and column mappings. Pure: same contact and
//! same mappings always produce the same map.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::{Contact, StaticVariable, VariableMapping};

/// Resolve the substitution map for one contact.
///
/// Static variables seed the map; column mappings are applied second and
/// override a static value for the same placeholder. A mapping contributes
/// only when its trimmed placeholder key is non-empty and the mapped column
/// is present and non-null in the contact's raw data. An empty result means
/// the message is sent with no variable substitution.
pub fn resolve(
    contact: &Contact,
    statics: &[StaticVariable],
    mappings: &[VariableMapping],
) -> BTreeMap<String, String> {
    let mut variables = BTreeMap::new();

    for s in statics {
        let key = s.variable.trim();
        if !key.is_empty() {
            variables.insert(key.to_string(), s.value.clone());
        }
    }

    for m in mappings {
        let key = m.variable.trim();
        if key.is_empty() {
            continue;
        }
        match contact.raw_data.get(&m.column_key) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => {
                variables.insert(key.to_string(), s.clone());
            }
            Some(other) => {
                variables.insert(key.to_string(), other.to_string());
            }
        }
    }

    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact(raw: Value) -> Contact {
        let Value::Object(raw_data) = raw else {
            panic!("raw data must be a JSON object");
        };
        Contact {
            id: "contact-1".to_string(),
            contact_list_id: "list-1".to_string(),
            phone: "+5511912345678".to_string(),
            raw_data,
        }
    }

    fn mapping(variable: &str, column_key: &str) -> VariableMapping {
        VariableMapping {
            session_id: "sess-1".to_string(),
            variable: variable.to_string(),
            column_key: column_key.to_string(),
        }
    }

    fn static_var(variable: &str, value: &str) -> StaticVariable {
        StaticVariable {
            session_id: "sess-1".to_string(),
            variable: variable.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn maps_present_columns() {
        let c = contact(json!({"name": "Ana", "city": "Recife"}));
        let vars = resolve(&c, &[], &[mapping("1", "name"), mapping("2", "city")]);
        assert_eq!(vars.get("1").map(String::as_str), Some("Ana"));
        assert_eq!(vars.get("2").map(String::as_str), Some("Recife"));
    }

    #[test]
    fn absent_column_omitted() {
        let c = contact(json!({"name": "Ana"}));
        let vars = resolve(&c, &[], &[mapping("1", "name"), mapping("2", "missing")]);
        assert_eq!(vars.len(), 1);
        assert!(!vars.contains_key("2"));
    }

    #[test]
    fn null_column_omitted() {
        let c = contact(json!({"name": null}));
        let vars = resolve(&c, &[], &[mapping("1", "name")]);
        assert!(vars.is_empty());
    }

    #[test]
    fn non_string_values_coerced() {
        let c = contact(json!({"age": 42, "active": true}));
        let vars = resolve(&c, &[], &[mapping("1", "age"), mapping("2", "active")]);
        assert_eq!(vars.get("1").map(String::as_str), Some("42"));
        assert_eq!(vars.get("2").map(String::as_str), Some("true"));
    }

    #[test]
    fn placeholder_key_trimmed_and_blank_skipped() {
        let c = contact(json!({"name": "Ana"}));
        let vars = resolve(&c, &[], &[mapping(" 1 ", "name"), mapping("   ", "name")]);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("1").map(String::as_str), Some("Ana"));
    }

    #[test]
    fn no_mappings_yields_empty_map() {
        let c = contact(json!({"name": "Ana"}));
        assert!(resolve(&c, &[], &[]).is_empty());
    }

    #[test]
    fn static_variables_seed_the_map() {
        let c = contact(json!({}));
        let vars = resolve(&c, &[static_var("3", "welcome.png")], &[]);
        assert_eq!(vars.get("3").map(String::as_str), Some("welcome.png"));
    }

    #[test]
    fn mapping_overrides_static_for_same_placeholder() {
        let c = contact(json!({"name": "Ana"}));
        let vars = resolve(
            &c,
            &[static_var("1", "fallback")],
            &[mapping("1", "name")],
        );
        assert_eq!(vars.get("1").map(String::as_str), Some("Ana"));
    }

    #[test]
    fn static_survives_when_mapped_column_absent() {
        let c = contact(json!({}));
        let vars = resolve(
            &c,
            &[static_var("1", "fallback")],
            &[mapping("1", "missing")],
        );
        assert_eq!(vars.get("1").map(String::as_str), Some("fallback"));
    }

    #[test]
    fn resolution_is_pure() {
        let c = contact(json!({"name": "Ana", "n": 7}));
        let statics = [static_var("9", "lit")];
        let mappings = [mapping("1", "name"), mapping("2", "n")];
        assert_eq!(
            resolve(&c, &statics, &mappings),
            resolve(&c, &statics, &mappings)
        );
    }
}
