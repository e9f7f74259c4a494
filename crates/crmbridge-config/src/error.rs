use crate::env_resolver::EnvResolverError;
use crmbridge_registry::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment error: {0}")]
    Env(#[from] EnvResolverError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Unknown vendor '{vendor}'. Available: {available}")]
    UnknownVendor { vendor: String, available: String },

    #[error("Missing credential for {vendor}: environment variable {var} is not set")]
    MissingCredential { vendor: String, var: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
