//! Vendor catalogs: one vendor's tools described as data

use crate::env_resolver::{EnvResolver, EnvSource};
use crate::error::{ConfigError, ConfigResult};
use crmbridge_connectors::{AuthStyle, Confirmation, EndpointDescriptor, HttpMethod};
use crmbridge_core::{CredentialSource, ParamLocation, ParamSpec, ParamType, Refinement};
use crmbridge_registry::HttpToolDefinition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

/// A vendor integration: shared base URL and auth plus its tool list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorCatalog {
    pub vendor: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// May contain `${VAR}` / `${VAR:default}` placeholders
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthStyle,
    #[serde(default)]
    pub credential: CredentialSource,
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
}

/// One tool of a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    pub method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub fixed_query: IndexMap<String, String>,
    #[serde(default)]
    pub fixed_body: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub confirmation: Option<Confirmation>,
    #[serde(default)]
    pub refinements: Vec<Refinement>,
}

impl VendorCatalog {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.vendor)
    }

    /// Environment variable that overrides the base URL, e.g. `PIPEDRIVE_BASE_URL`
    pub fn base_url_override_var(&self) -> String {
        format!("{}_BASE_URL", self.vendor.to_uppercase().replace('-', "_"))
    }

    /// Environment variable holding the startup credential, if any
    pub fn credential_env_var(&self) -> Option<&str> {
        match &self.credential {
            CredentialSource::Env { var } => Some(var),
            _ => None,
        }
    }

    /// Structural checks independent of the environment
    pub fn validate(&self) -> ConfigResult<()> {
        if self.vendor.trim().is_empty() {
            return Err(ConfigError::Validation("catalog vendor name is empty".to_string()));
        }
        if self.tools.is_empty() {
            return Err(ConfigError::Validation(format!("catalog '{}' declares no tools", self.vendor)));
        }
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "catalog '{}' declares tool '{}' twice",
                    self.vendor, tool.name
                )));
            }
        }
        if let CredentialSource::Argument { field } = &self.credential {
            if field.trim().is_empty() {
                return Err(ConfigError::Validation("credential argument field is empty".to_string()));
            }
        }
        Ok(())
    }

    /// Resolve the base URL: explicit override first, then placeholders
    pub fn resolve_base_url(&self, env: &dyn EnvSource) -> ConfigResult<String> {
        let resolver = EnvResolver::new(env);
        let override_var = self.base_url_override_var();
        if let Some(url) = resolver.lookup(&override_var) {
            tracing::info!(vendor = %self.vendor, var = %override_var, "using base URL override");
            return Ok(url);
        }
        Ok(resolver.resolve_str(&self.base_url)?)
    }

    /// Compile every tool entry into an HTTP tool definition
    pub fn to_definitions(&self, env: &dyn EnvSource) -> ConfigResult<Vec<HttpToolDefinition>> {
        self.validate()?;
        let base_url = self.resolve_base_url(env)?;
        Ok(self.tools.iter().map(|tool| self.definition(tool, &base_url)).collect())
    }

    fn definition(&self, tool: &ToolEntry, base_url: &str) -> HttpToolDefinition {
        let mut params = tool.params.clone();
        if let CredentialSource::Argument { field } = &self.credential {
            // Per-call credentials are declared once per catalog
            if !params.iter().any(|p| &p.name == field) {
                params.insert(
                    0,
                    ParamSpec::new(field.clone(), ParamType::String)
                        .required()
                        .located(ParamLocation::Credential)
                        .describe(format!("{} API token", self.display_name())),
                );
            }
        }

        let mut endpoint = EndpointDescriptor::new(tool.method, base_url, tool.path.clone())
            .with_params(params)
            .with_auth(self.auth.clone(), self.credential.clone());
        endpoint.fixed_query =
            tool.fixed_query.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        endpoint.fixed_body = tool.fixed_body.clone();
        endpoint.confirmation = tool.confirmation.clone();

        HttpToolDefinition {
            name: tool.name.clone(),
            title: tool.title.clone(),
            description: tool.description.clone(),
            endpoint,
            refinements: tool.refinements.clone(),
        }
    }
}
