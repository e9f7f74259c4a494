//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crmbridge",
    about = "crmbridge - MCP tool servers for CRM and helpdesk REST APIs",
    version,
    author = "CRM Bridge Team"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable debug logging (RUST_LOG takes precedence)")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve a vendor's tools over MCP stdio
    Serve {
        /// Vendor key (pipedrive, freshdesk, hubspot, capsule, close)
        vendor: String,

        /// Load the vendor catalog from this YAML/JSON file instead of the built-in one
        #[arg(long, env = "CRMBRIDGE_CATALOG")]
        catalog: Option<PathBuf>,

        /// Only expose tools matching these patterns (e.g. "list*", "getDeal")
        #[arg(long = "allow")]
        allow_patterns: Vec<String>,

        /// Hide tools matching these patterns (e.g. "delete*", "*Ticket")
        #[arg(long = "deny")]
        deny_patterns: Vec<String>,

        /// Vendor HTTP request timeout in seconds
        #[arg(long, default_value = "30", env = "CRMBRIDGE_TIMEOUT_SECS")]
        timeout_secs: u64,
    },

    /// List the tools a vendor exposes
    Tools {
        /// Vendor key
        vendor: String,

        /// Load the vendor catalog from this YAML/JSON file
        #[arg(long, env = "CRMBRIDGE_CATALOG")]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Invoke one tool and print its reply
    Call {
        /// Vendor key
        vendor: String,

        /// Tool name, e.g. listDeals
        tool: String,

        /// Tool arguments as inline JSON
        #[arg(short, long, conflicts_with = "input_file")]
        input: Option<String>,

        /// Read tool arguments from a JSON or YAML file
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Load the vendor catalog from this YAML/JSON file
        #[arg(long, env = "CRMBRIDGE_CATALOG")]
        catalog: Option<PathBuf>,

        /// Vendor HTTP request timeout in seconds
        #[arg(long, default_value = "30", env = "CRMBRIDGE_TIMEOUT_SECS")]
        timeout_secs: u64,
    },

    /// List the built-in vendor catalogs
    Vendors,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// Pretty-printed JSON
    Json,
}
