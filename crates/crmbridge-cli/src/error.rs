//! Error types for the CLI

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] crmbridge_config::ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] crmbridge_registry::RegistryError),

    #[error("MCP server error: {0}")]
    Mcp(#[from] crmbridge_mcp::McpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Tool '{0}' returned an error")]
    ToolFailed(String),

    #[error("{0}")]
    General(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
