//! Endpoint descriptors: one vendor REST call described as data

use super::auth::AuthStyle;
use crmbridge_core::{CredentialSource, ParamLocation, ParamSpec, ValidatedInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// HTTP method of a vendor endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Methods that carry a JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }

    pub fn is_idempotent(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Put | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Where the identifier shown in a confirmation line comes from.
///
/// Written in configuration as `response:<json-pointer>` or `input:<field>`;
/// a bare pointer such as `/id` means `response:/id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IdSource {
    Response(String),
    Input(String),
}

impl TryFrom<String> for IdSource {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(field) = value.strip_prefix("input:") {
            if field.is_empty() {
                return Err("input id source needs a field name".to_string());
            }
            return Ok(IdSource::Input(field.to_string()));
        }
        let pointer = value.strip_prefix("response:").unwrap_or(&value);
        if !pointer.starts_with('/') {
            return Err(format!("response id source must be a JSON pointer, got '{}'", pointer));
        }
        Ok(IdSource::Response(pointer.to_string()))
    }
}

impl From<IdSource> for String {
    fn from(source: IdSource) -> Self {
        match source {
            IdSource::Response(pointer) => format!("response:{}", pointer),
            IdSource::Input(field) => format!("input:{}", field),
        }
    }
}

/// Human-readable confirmation prefixed to mutating responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Template with an `{id}` placeholder, e.g. `Ticket created successfully with ID: {id}`
    pub message: String,
    #[serde(default = "default_id_source")]
    pub id: IdSource,
}

fn default_id_source() -> IdSource {
    IdSource::Response("/id".to_string())
}

impl Confirmation {
    pub fn new(message: impl Into<String>, id: IdSource) -> Self {
        Self { message: message.into(), id }
    }

    /// Render the confirmation line, if the identifier can be found
    pub fn render(&self, response: &JsonValue, input: &ValidatedInput) -> Option<String> {
        let id = match &self.id {
            IdSource::Response(pointer) => response.pointer(pointer),
            IdSource::Input(field) => input.get(field),
        }?;
        let id = match id {
            JsonValue::String(s) if !s.is_empty() => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(self.message.replace("{id}", &id))
    }
}

/// One vendor REST call: method, URL template, field shaping and auth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub method: HttpMethod,
    pub base_url: String,
    /// Path template; `{name}` segments are filled from path parameters
    pub path: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub auth: AuthStyle,
    #[serde(default)]
    pub credential: CredentialSource,
    /// Constant query parameters sent on every call
    #[serde(default)]
    pub fixed_query: Vec<(String, String)>,
    /// Constant body fields merged before supplied fields
    #[serde(default)]
    pub fixed_body: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub confirmation: Option<Confirmation>,
}

impl EndpointDescriptor {
    pub fn new(method: HttpMethod, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.into(),
            path: path.into(),
            params: Vec::new(),
            auth: AuthStyle::None,
            credential: CredentialSource::None,
            fixed_query: Vec::new(),
            fixed_body: None,
            confirmation: None,
        }
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn with_auth(mut self, auth: AuthStyle, credential: CredentialSource) -> Self {
        self.auth = auth;
        self.credential = credential;
        self
    }

    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(move |p| p.location == location)
    }
}
