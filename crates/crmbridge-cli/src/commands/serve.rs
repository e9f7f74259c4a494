//! MCP stdio server command

use super::load_vendor;
use crate::error::CliResult;
use crmbridge_config::{build_registry, EnvSource, ServerSettings};
use crmbridge_mcp::{serve_stdio, GovernanceConfig, McpServer, ServerInfo};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct ServeCommand;

impl ServeCommand {
    pub async fn run(
        vendor: &str,
        catalog_path: Option<&Path>,
        allow_patterns: Vec<String>,
        deny_patterns: Vec<String>,
        timeout_secs: u64,
        env: &dyn EnvSource,
    ) -> CliResult<()> {
        let (catalog, credentials) = load_vendor(vendor, catalog_path, env)?;

        let settings = ServerSettings::default().with_timeout_secs(timeout_secs);
        let registry = build_registry(&catalog, credentials, &settings, env)?;

        let governance = GovernanceConfig::new(allow_patterns, deny_patterns);
        if !governance.is_unrestricted() {
            info!(
                allow = ?governance.allow_patterns,
                deny = ?governance.deny_patterns,
                "tool filter active"
            );
        }

        let info = ServerInfo::new(format!("crmbridge-{}", catalog.vendor))
            .with_title(format!("{} (crmbridge)", catalog.display_name()))
            .with_instructions(format!(
                "Tools for the {} REST API. Each call performs one HTTP request and returns the raw JSON response.",
                catalog.display_name()
            ));

        let server = Arc::new(McpServer::new(Arc::new(registry), governance, info));
        serve_stdio(server).await?;
        Ok(())
    }
}
