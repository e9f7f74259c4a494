//! One-shot tool invocation

use super::load_vendor;
use crate::{
    error::{CliError, CliResult},
    utils::{read_input_data, ColoredOutput},
};
use crmbridge_config::{build_registry, EnvSource, ServerSettings};
use crmbridge_core::Envelope;
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub struct CallCommand;

impl CallCommand {
    #[allow(clippy::too_many_arguments)]
    pub async fn run(
        vendor: &str,
        tool: &str,
        input: Option<&str>,
        input_file: Option<&Path>,
        catalog_path: Option<&Path>,
        timeout_secs: u64,
        env: &dyn EnvSource,
    ) -> CliResult<()> {
        let arguments = read_input_data(input, input_file)?;
        let envelope = Self::invoke(vendor, tool, arguments, catalog_path, timeout_secs, env).await?;

        if envelope.is_error() {
            eprintln!("{}", ColoredOutput::error(&envelope.text_content()));
            return Err(CliError::ToolFailed(tool.to_string()));
        }

        println!("{}", envelope.text_content());
        Ok(())
    }

    /// Build the vendor registry and run a single tool
    pub async fn invoke(
        vendor: &str,
        tool: &str,
        arguments: serde_json::Value,
        catalog_path: Option<&Path>,
        timeout_secs: u64,
        env: &dyn EnvSource,
    ) -> CliResult<Envelope> {
        let (catalog, credentials) = load_vendor(vendor, catalog_path, env)?;
        let settings = ServerSettings::default().with_timeout_secs(timeout_secs);
        let registry = build_registry(&catalog, credentials, &settings, env)?;

        let started = Instant::now();
        let envelope = registry.invoke(tool, arguments).await?;
        info!(
            tool = %tool,
            is_error = envelope.is_error(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "call finished"
        );
        Ok(envelope)
    }
}
