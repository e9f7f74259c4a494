//! HTTP tool factory: endpoint descriptors become registered tools

use crate::{
    error::{RegistryError, RegistryResult},
    tool::{ToolAnnotations, ToolDescriptor, ToolHandler},
};
use async_trait::async_trait;
use crmbridge_connectors::http::url_builder::UrlBuilder;
use crmbridge_connectors::{build_request, EndpointDescriptor, HttpDispatcher, HttpMethod};
use crmbridge_core::{
    CredentialSource, Credentials, Envelope, InputSchema, ParamLocation, ParamType, Refinement,
    ValidatedInput,
};
use std::sync::Arc;

/// Declarative definition of one HTTP-backed tool
#[derive(Debug, Clone, PartialEq)]
pub struct HttpToolDefinition {
    pub name: String,
    pub title: Option<String>,
    pub description: String,
    pub endpoint: EndpointDescriptor,
    pub refinements: Vec<Refinement>,
}

/// Handler that builds the vendor request and normalizes the response
pub struct HttpEndpointHandler {
    endpoint: EndpointDescriptor,
    credentials: Arc<Credentials>,
    dispatcher: HttpDispatcher,
}

#[async_trait]
impl ToolHandler for HttpEndpointHandler {
    async fn call(&self, input: ValidatedInput) -> RegistryResult<Envelope> {
        let request = build_request(&self.endpoint, &input, &self.credentials)?;
        Ok(self
            .dispatcher
            .execute_with_confirmation(&request, self.endpoint.confirmation.as_ref(), &input)
            .await)
    }
}

/// Builds tool descriptors sharing one dispatcher and one credential value
#[derive(Clone)]
pub struct HttpToolFactory {
    dispatcher: HttpDispatcher,
    credentials: Arc<Credentials>,
}

impl HttpToolFactory {
    pub fn new(dispatcher: HttpDispatcher, credentials: Credentials) -> Self {
        Self { dispatcher, credentials: Arc::new(credentials) }
    }

    /// Check a definition and wrap it into a descriptor
    pub fn create_tool(&self, definition: HttpToolDefinition) -> RegistryResult<ToolDescriptor> {
        check_definition(&definition)?;

        let schema = InputSchema::new(definition.endpoint.params.clone(), definition.refinements)
            .map_err(|e| RegistryError::InvalidTool {
                tool: definition.name.clone(),
                reason: e.to_string(),
            })?;
        let annotations = annotations_for(definition.endpoint.method);

        let handler = Arc::new(HttpEndpointHandler {
            endpoint: definition.endpoint,
            credentials: self.credentials.clone(),
            dispatcher: self.dispatcher.clone(),
        });

        let mut descriptor = ToolDescriptor::new(definition.name, definition.description, schema, handler)
            .with_annotations(annotations);
        if let Some(title) = definition.title {
            descriptor = descriptor.with_title(title);
        }
        Ok(descriptor)
    }

    pub fn create_tools<I>(&self, definitions: I) -> RegistryResult<Vec<ToolDescriptor>>
    where
        I: IntoIterator<Item = HttpToolDefinition>,
    {
        definitions.into_iter().map(|d| self.create_tool(d)).collect()
    }
}

fn annotations_for(method: HttpMethod) -> ToolAnnotations {
    ToolAnnotations {
        read_only_hint: method.is_read_only(),
        destructive_hint: method == HttpMethod::Delete,
        idempotent_hint: method.is_idempotent(),
        open_world_hint: true,
    }
}

fn check_definition(definition: &HttpToolDefinition) -> RegistryResult<()> {
    let invalid = |reason: String| RegistryError::InvalidTool { tool: definition.name.clone(), reason };
    let endpoint = &definition.endpoint;

    if definition.name.trim().is_empty() {
        return Err(invalid("tool name is empty".to_string()));
    }

    for placeholder in UrlBuilder::placeholders(&endpoint.path) {
        let param = endpoint
            .params_in(ParamLocation::Path)
            .find(|p| p.name == placeholder || p.wire_key() == placeholder)
            .ok_or_else(|| invalid(format!("path placeholder '{{{}}}' has no path parameter", placeholder)))?;
        if !param.required {
            return Err(invalid(format!("path parameter '{}' must be required", param.name)));
        }
    }

    if let CredentialSource::Argument { field } = &endpoint.credential {
        let declared = endpoint.params.iter().any(|p| {
            &p.name == field
                && p.required
                && p.param_type == ParamType::String
                && p.location == ParamLocation::Credential
        });
        if !declared {
            return Err(invalid(format!(
                "credential argument '{}' must be a required string parameter in 'credential'",
                field
            )));
        }
    }

    if !endpoint.method.has_body() {
        if endpoint.fixed_body.is_some() {
            return Err(invalid(format!("{} requests cannot carry a fixed body", endpoint.method)));
        }
        if let Some(param) = endpoint.params_in(ParamLocation::Body).next() {
            return Err(invalid(format!(
                "parameter '{}' is a body field but {} requests have no body; set its location to query or path",
                param.name, endpoint.method
            )));
        }
    }
    Ok(())
}
