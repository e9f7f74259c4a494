//! Tool listing command

use crate::{
    cli::OutputFormat,
    error::CliResult,
    utils::{truncate_text, ColoredOutput},
};
use crmbridge_config::{build_registry, CatalogLoader, EnvSource, ServerSettings, VendorCatalog};
use crmbridge_core::Credentials;
use crmbridge_mcp::mcp::Tool;
use crmbridge_registry::ToolRegistry;
use std::path::Path;
use tracing::debug;

pub struct ToolsCommand;

impl ToolsCommand {
    pub fn run(
        vendor: &str,
        catalog_path: Option<&Path>,
        format: OutputFormat,
        env: &dyn EnvSource,
    ) -> CliResult<()> {
        let catalog = CatalogLoader::resolve(vendor, catalog_path)?;
        // listing never calls the vendor, so no credential is loaded
        let registry =
            build_registry(&catalog, Credentials::none(), &ServerSettings::default(), env)?;
        debug!(tools = registry.len(), "listing tools");

        match format {
            OutputFormat::Table => Self::display_table(&catalog, &registry),
            OutputFormat::Json => {
                let tools: Vec<Tool> = registry.tools().map(Tool::from).collect();
                println!("{}", serde_json::to_string_pretty(&tools)?);
            }
        }
        Ok(())
    }

    fn display_table(catalog: &VendorCatalog, registry: &ToolRegistry) {
        println!(
            "{}",
            ColoredOutput::success(&format!(
                "{} exposes {} tool(s):",
                catalog.display_name(),
                registry.len()
            ))
        );
        println!();
        println!("{:<22} {:<7} {:<36} {}", "NAME", "METHOD", "PATH", "DESCRIPTION");
        println!("{}", "-".repeat(100));

        for tool in registry.tools() {
            let (method, path) = catalog
                .tools
                .iter()
                .find(|entry| entry.name == tool.name)
                .map(|entry| (entry.method.as_str(), entry.path.as_str()))
                .unwrap_or(("", ""));
            println!(
                "{} {:<7} {:<36} {}",
                ColoredOutput::highlight(&format!("{:<22}", tool.name)),
                method,
                truncate_text(path, 36),
                ColoredOutput::dim(&truncate_text(&tool.description, 40))
            );
        }
    }
}
