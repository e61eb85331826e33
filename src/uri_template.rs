// src/uri_template.rs
//! URI-template expansion (RFC 6570).
//!
//! Thin adapter over the `uritemplate` crate. Template syntax and the
//! handling of variables missing from the map belong to the engine, not to
//! this layer; RFC 6570 renders unset variables as empty.

use serde_json::Value;
use std::collections::HashMap;
use uritemplate::{TemplateVar, UriTemplate};

/// Expands a URI template against a variable map.
///
/// Scalar JSON values (strings, numbers, booleans) are substituted as their
/// unquoted display form, arrays as RFC 6570 lists, objects as associative
/// arrays. Null values are skipped.
pub fn expand(template: &str, variables: &HashMap<String, Value>) -> String {
    let mut uri = UriTemplate::new(template);
    for (name, value) in variables {
        if let Some(var) = to_template_var(value) {
            uri.set(name, var);
        }
    }
    uri.build()
}

fn to_template_var(value: &Value) -> Option<TemplateVar> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(TemplateVar::List(
            items.iter().filter_map(scalar_string).collect(),
        )),
        Value::Object(map) => Some(TemplateVar::AssociativeArray(
            map.iter()
                .filter_map(|(k, v)| scalar_string(v).map(|s| (k.clone(), s)))
                .collect(),
        )),
        scalar => scalar_string(scalar).map(TemplateVar::Scalar),
    }
}

/// Display form of a scalar: strings without quotes, numbers and booleans as
/// written. Nested arrays/objects have no scalar form.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
