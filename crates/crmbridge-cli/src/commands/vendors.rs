//! Built-in vendor listing

use crate::{error::CliResult, utils::ColoredOutput};
use crmbridge_config::CatalogLoader;

pub struct VendorsCommand;

impl VendorsCommand {
    pub fn run() -> CliResult<()> {
        let vendors = CatalogLoader::builtin_vendors();
        println!("{}", ColoredOutput::success(&format!("{} built-in vendor(s):", vendors.len())));
        println!();
        println!("{:<12} {:<12} {:<6} {}", "VENDOR", "NAME", "TOOLS", "CREDENTIAL");
        println!("{}", "-".repeat(60));

        for vendor in vendors {
            let catalog = CatalogLoader::builtin(vendor)?;
            let credential = match catalog.credential_env_var() {
                Some(var) => format!("env {}", var),
                None => "per-call argument".to_string(),
            };
            println!(
                "{} {:<12} {:<6} {}",
                ColoredOutput::highlight(&format!("{:<12}", catalog.vendor)),
                catalog.display_name(),
                catalog.tools.len(),
                ColoredOutput::dim(&credential)
            );
        }
        Ok(())
    }
}
