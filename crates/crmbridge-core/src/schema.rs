//! Declarative tool input schemas
//!
//! A tool's parameters are described as data ([`ParamSpec`]). The same list is
//! compiled into a JSON Schema document (advertised to MCP clients) and used to
//! validate raw tool arguments into a [`ValidatedInput`] that contains only
//! the declared fields, with defaults applied.

use crate::error::{CoreError, CoreResult};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

/// Where a parameter ends up in the outgoing HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    #[default]
    Body,
    /// Carries the vendor credential; never forwarded as data
    Credential,
}

/// A single declared tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    /// Explicit `null` is accepted and forwarded to the vendor
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, rename = "in")]
    pub location: ParamLocation,
    /// Name used on the wire; dots nest the field inside the JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_name: Option<String>,
    /// Element type for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ParamType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            description: None,
            allowed: None,
            default: None,
            nullable: false,
            location: ParamLocation::Body,
            wire_name: None,
            items: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn located(mut self, location: ParamLocation) -> Self {
        self.location = location;
        self
    }

    pub fn wire(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn one_of(mut self, values: Vec<JsonValue>) -> Self {
        self.allowed = Some(values);
        self
    }

    pub fn items(mut self, item_type: ParamType) -> Self {
        self.items = Some(item_type);
        self
    }

    /// The key this parameter is sent under
    pub fn wire_key(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }

    fn property_schema(&self) -> JsonValue {
        let mut prop = Map::new();
        let ty = if self.nullable {
            json!([self.param_type.as_str(), "null"])
        } else {
            json!(self.param_type.as_str())
        };
        prop.insert("type".into(), ty);
        if let Some(desc) = &self.description {
            prop.insert("description".into(), json!(desc));
        }
        if let Some(values) = &self.allowed {
            let mut values = values.clone();
            if self.nullable {
                values.push(JsonValue::Null);
            }
            prop.insert("enum".into(), JsonValue::Array(values));
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        if self.param_type == ParamType::Array {
            let item_type = self.items.unwrap_or(ParamType::String);
            prop.insert("items".into(), json!({ "type": item_type.as_str() }));
        }
        if let Some(min) = self.minimum {
            prop.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.maximum {
            prop.insert("maximum".into(), json!(max));
        }
        JsonValue::Object(prop)
    }
}

/// Cross-field constraint applied after per-field validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    pub at_least_one_of: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Refinement {
    pub fn at_least_one_of<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { at_least_one_of: fields.into_iter().map(Into::into).collect(), message: None }
    }

    fn check(&self, input: &Map<String, JsonValue>) -> Option<ValidationFailure> {
        let satisfied = self
            .at_least_one_of
            .iter()
            .any(|f| input.get(f).map(|v| !v.is_null()).unwrap_or(false));
        if satisfied {
            return None;
        }
        let reason = self.message.clone().unwrap_or_else(|| {
            format!("at least one of {} is required", self.at_least_one_of.join(", "))
        });
        Some(ValidationFailure { field: None, reason })
    }
}

/// One reason a raw input was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: Option<String>,
    pub reason: String,
}

impl ValidationFailure {
    fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: Some(field.into()), reason: reason.into() }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Input that passed schema validation; only declared fields are kept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedInput(Map<String, JsonValue>);

impl ValidatedInput {
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(JsonValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, JsonValue> {
        self.0
    }
}

impl From<Map<String, JsonValue>> for ValidatedInput {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

/// Compiled input schema of a tool
#[derive(Clone)]
pub struct InputSchema {
    params: Vec<ParamSpec>,
    refinements: Vec<Refinement>,
    document: JsonValue,
    compiled: Arc<JSONSchema>,
}

impl fmt::Debug for InputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSchema")
            .field("params", &self.params)
            .field("refinements", &self.refinements)
            .finish()
    }
}

impl InputSchema {
    /// Build and compile a schema; fails on duplicate names or an invalid document
    pub fn new(params: Vec<ParamSpec>, refinements: Vec<Refinement>) -> CoreResult<Self> {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for p in &params {
            if properties.contains_key(&p.name) {
                return Err(CoreError::Schema(format!("duplicate parameter '{}'", p.name)));
            }
            properties.insert(p.name.clone(), p.property_schema());
            if p.required {
                required.push(JsonValue::String(p.name.clone()));
            }
        }
        for r in &refinements {
            if let Some(unknown) = r.at_least_one_of.iter().find(|f| !properties.contains_key(*f)) {
                return Err(CoreError::Schema(format!(
                    "refinement references unknown parameter '{}'",
                    unknown
                )));
            }
        }

        let mut document = Map::new();
        document.insert("type".into(), json!("object"));
        document.insert("properties".into(), JsonValue::Object(properties));
        if !required.is_empty() {
            document.insert("required".into(), JsonValue::Array(required));
        }
        let document = JsonValue::Object(document);

        let compiled = JSONSchema::compile(&document)
            .map_err(|e| CoreError::Schema(format!("invalid input schema: {}", e)))?;

        Ok(Self { params, refinements, document, compiled: Arc::new(compiled) })
    }

    /// Schema accepting any object and declaring no parameters
    pub fn empty() -> CoreResult<Self> {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// JSON Schema document advertised to clients
    pub fn document(&self) -> &JsonValue {
        &self.document
    }

    /// Validate raw arguments, returning every problem found
    pub fn validate(&self, raw: &JsonValue) -> Result<ValidatedInput, Vec<ValidationFailure>> {
        let raw_map = match raw {
            JsonValue::Object(map) => map,
            JsonValue::Null => return self.validate_map(&Map::new()),
            other => {
                return Err(vec![ValidationFailure {
                    field: None,
                    reason: format!("arguments must be an object, got {}", json_type_name(other)),
                }])
            }
        };
        self.validate_map(raw_map)
    }

    fn validate_map(
        &self,
        raw: &Map<String, JsonValue>,
    ) -> Result<ValidatedInput, Vec<ValidationFailure>> {
        // null on a non-nullable optional field means "not supplied"
        let candidate: Map<String, JsonValue> = raw
            .iter()
            .filter(|(key, value)| {
                !(value.is_null()
                    && self.param(key).map(|p| !p.nullable && !p.required).unwrap_or(false))
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut failures: Vec<ValidationFailure> = self
            .params
            .iter()
            .filter(|p| p.required && !candidate.contains_key(&p.name))
            .map(|p| ValidationFailure::field(&p.name, "is required"))
            .collect();

        let candidate_value = JsonValue::Object(candidate);
        if let Err(errors) = self.compiled.validate(&candidate_value) {
            for e in errors {
                let path = e.instance_path.to_string();
                let field = path.trim_start_matches('/').replace('/', ".");
                if field.is_empty() {
                    // Missing required properties are already reported above
                    if failures.iter().any(|f| f.field.is_some()) {
                        continue;
                    }
                    failures.push(ValidationFailure { field: None, reason: e.to_string() });
                } else {
                    failures.push(ValidationFailure::field(field, e.to_string()));
                }
            }
        }

        let candidate = match candidate_value {
            JsonValue::Object(map) => map,
            _ => Map::new(),
        };

        if failures.is_empty() {
            failures.extend(self.refinements.iter().filter_map(|r| r.check(&candidate)));
        }
        if !failures.is_empty() {
            return Err(failures);
        }

        let mut accepted = Map::new();
        for p in &self.params {
            match candidate.get(&p.name) {
                Some(value) => {
                    accepted.insert(p.name.clone(), normalize_integers(p, value.clone()));
                }
                None => {
                    if let Some(default) = &p.default {
                        accepted.insert(p.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(ValidatedInput(accepted))
    }
}

/// Integer-typed values arrive as `42.0` from some clients; store them as
/// JSON integers so they render without a fraction on the wire.
fn normalize_integers(param: &ParamSpec, value: JsonValue) -> JsonValue {
    match (param.param_type, value) {
        (ParamType::Integer, value) => whole_number(value),
        (ParamType::Array, JsonValue::Array(items)) if param.items == Some(ParamType::Integer) => {
            JsonValue::Array(items.into_iter().map(whole_number).collect())
        }
        (_, value) => value,
    }
}

fn whole_number(value: JsonValue) -> JsonValue {
    let JsonValue::Number(n) = &value else {
        return value;
    };
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            JsonValue::from(f as i64)
        }
        _ => value,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
