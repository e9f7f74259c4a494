//! Registry construction for one vendor

use crate::catalog::VendorCatalog;
use crate::env_resolver::EnvSource;
use crate::error::{ConfigError, ConfigResult};
use crate::settings::ServerSettings;
use crmbridge_connectors::{HttpDispatcher, HttpTransport, ReqwestTransport};
use crmbridge_core::Credentials;
use crmbridge_registry::{HttpToolFactory, ToolRegistry};
use std::sync::Arc;

/// Build the registry of `catalog` over the reqwest transport
pub fn build_registry(
    catalog: &VendorCatalog,
    credentials: Credentials,
    settings: &ServerSettings,
    env: &dyn EnvSource,
) -> ConfigResult<ToolRegistry> {
    let transport = ReqwestTransport::new(&settings.client_config())
        .map_err(|e| ConfigError::Validation(format!("HTTP client: {}", e)))?;
    build_registry_with_transport(catalog, credentials, Arc::new(transport), env)
}

/// Build the registry of `catalog` over any transport
pub fn build_registry_with_transport(
    catalog: &VendorCatalog,
    credentials: Credentials,
    transport: Arc<dyn HttpTransport>,
    env: &dyn EnvSource,
) -> ConfigResult<ToolRegistry> {
    let factory = HttpToolFactory::new(HttpDispatcher::new(transport), credentials);
    let definitions = catalog.to_definitions(env)?;

    let mut registry = ToolRegistry::new();
    registry.register_all(factory.create_tools(definitions)?)?;
    tracing::info!(vendor = %catalog.vendor, tools = registry.len(), "tool registry ready");
    Ok(registry)
}
