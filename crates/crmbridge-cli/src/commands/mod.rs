pub mod call;
pub mod serve;
pub mod tools;
pub mod vendors;

// Re-export command handlers
pub use call::CallCommand;
pub use serve::ServeCommand;
pub use tools::ToolsCommand;
pub use vendors::VendorsCommand;

use crate::error::CliResult;
use crmbridge_config::{load_credentials, CatalogLoader, EnvSource, VendorCatalog};
use crmbridge_core::Credentials;
use std::path::Path;
use tracing::debug;

/// Load a vendor catalog and its startup credential.
///
/// Fails on a missing credential before any registry is built.
pub(crate) fn load_vendor(
    vendor: &str,
    catalog_path: Option<&Path>,
    env: &dyn EnvSource,
) -> CliResult<(VendorCatalog, Credentials)> {
    let catalog = CatalogLoader::resolve(vendor, catalog_path)?;
    debug!(vendor = %catalog.vendor, tools = catalog.tools.len(), "catalog loaded");
    let credentials = load_credentials(&catalog, env)?;
    Ok((catalog, credentials))
}
