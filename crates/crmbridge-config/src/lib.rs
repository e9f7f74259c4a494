pub mod bootstrap;
pub mod catalog;
pub mod credentials;
pub mod env_resolver;
pub mod error;
pub mod loader;
pub mod settings;

pub use bootstrap::{build_registry, build_registry_with_transport};
pub use catalog::{ToolEntry, VendorCatalog};
pub use credentials::load_credentials;
pub use env_resolver::{EnvResolver, EnvResolverError, EnvSource, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use loader::{CatalogLoader, FileFormat};
pub use settings::ServerSettings;
