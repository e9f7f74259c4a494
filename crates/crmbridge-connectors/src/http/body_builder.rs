//! Field shaping for query strings and JSON bodies
//!
//! Only fields actually present in the validated input are emitted. Field
//! sets come from the endpoint's parameter list, so no endpoint carries
//! hand-written presence checks.

use crate::error::{ConnectorError, ConnectorResult};
use crmbridge_core::{ParamLocation, ParamSpec, ValidatedInput};
use serde_json::{Map, Value as JsonValue};

/// Builder for request query pairs and JSON bodies
pub struct BodyBuilder;

impl BodyBuilder {
    /// Query pairs for every present query parameter, in declaration order
    pub fn query_pairs(params: &[ParamSpec], input: &ValidatedInput) -> Vec<(String, String)> {
        params
            .iter()
            .filter(|p| p.location == ParamLocation::Query)
            .filter_map(|p| {
                let value = input.get(&p.name)?;
                let rendered = Self::query_value(value)?;
                Some((p.wire_key().to_string(), rendered))
            })
            .collect()
    }

    /// Render a JSON value as a query string value; `None` for null/empty
    pub fn query_value(value: &JsonValue) -> Option<String> {
        match value {
            JsonValue::Null => None,
            JsonValue::String(s) if s.is_empty() => None,
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            JsonValue::Array(items) => {
                let parts: Vec<String> = items.iter().filter_map(Self::query_value).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(","))
                }
            }
            JsonValue::Object(_) => Some(value.to_string()),
        }
    }

    /// Path parameter value as a raw (unencoded) string
    pub fn path_value(value: &JsonValue) -> Option<String> {
        match value {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// JSON body with `fixed` fields first, then each present body parameter.
    ///
    /// A dotted wire name (`properties.email`) nests the value. Explicit nulls
    /// only survive validation for nullable parameters, so they are forwarded.
    pub fn json_body(
        params: &[ParamSpec],
        fixed: Option<&Map<String, JsonValue>>,
        input: &ValidatedInput,
    ) -> ConnectorResult<JsonValue> {
        let mut body = fixed.cloned().unwrap_or_default();
        for p in params.iter().filter(|p| p.location == ParamLocation::Body) {
            if let Some(value) = input.get(&p.name) {
                Self::insert_path(&mut body, p.wire_key(), value.clone())?;
            }
        }
        Ok(JsonValue::Object(body))
    }

    fn insert_path(
        target: &mut Map<String, JsonValue>,
        dotted: &str,
        value: JsonValue,
    ) -> ConnectorResult<()> {
        match dotted.split_once('.') {
            None => {
                target.insert(dotted.to_string(), value);
                Ok(())
            }
            Some((head, tail)) => {
                let slot = target
                    .entry(head.to_string())
                    .or_insert_with(|| JsonValue::Object(Map::new()));
                match slot {
                    JsonValue::Object(inner) => Self::insert_path(inner, tail, value),
                    _ => Err(ConnectorError::InvalidConfig(format!(
                        "body field '{}' is not an object and cannot hold '{}'",
                        head, tail
                    ))),
                }
            }
        }
    }
}
