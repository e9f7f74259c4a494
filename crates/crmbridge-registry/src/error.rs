//! Error types for the tool registry

use crmbridge_connectors::ConnectorError;
use crmbridge_core::CoreError;
use thiserror::Error;

/// Registry-specific errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Tool '{0}' is already registered")]
    DuplicateName(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool definition '{tool}': {reason}")]
    InvalidTool { tool: String, reason: String },

    #[error("Error: {0}")]
    Handler(String),

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl From<CoreError> for RegistryError {
    fn from(err: CoreError) -> Self {
        Self::Connector(ConnectorError::from(err))
    }
}

/// Registry result type
pub type RegistryResult<T> = Result<T, RegistryError>;
