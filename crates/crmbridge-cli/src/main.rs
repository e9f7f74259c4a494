//! crmbridge CLI main entry point

use clap::Parser;
use crmbridge_cli::{
    cli::{Cli, Commands},
    commands::{CallCommand, ServeCommand, ToolsCommand, VendorsCommand},
    utils::{init_tracing, ColoredOutput},
};
use crmbridge_config::ProcessEnv;
use tracing::debug;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {:#}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Disable colored output if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose)?;
    debug!("crmbridge v{}", env!("CARGO_PKG_VERSION"));

    let env = ProcessEnv;
    match cli.command {
        Commands::Serve { vendor, catalog, allow_patterns, deny_patterns, timeout_secs } => {
            ServeCommand::run(
                &vendor,
                catalog.as_deref(),
                allow_patterns,
                deny_patterns,
                timeout_secs,
                &env,
            )
            .await?
        }

        Commands::Tools { vendor, catalog, format } => {
            ToolsCommand::run(&vendor, catalog.as_deref(), format, &env)?
        }

        Commands::Call { vendor, tool, input, input_file, catalog, timeout_secs } => {
            CallCommand::run(
                &vendor,
                &tool,
                input.as_deref(),
                input_file.as_deref(),
                catalog.as_deref(),
                timeout_secs,
                &env,
            )
            .await?
        }

        Commands::Vendors => VendorsCommand::run()?,
    }

    Ok(())
}
