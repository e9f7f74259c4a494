pub mod error;
pub mod http_factory;
pub mod registry;
pub mod tool;

// Re-export commonly used types
pub use error::{RegistryError, RegistryResult};
pub use http_factory::{HttpEndpointHandler, HttpToolDefinition, HttpToolFactory};
pub use registry::{InvocationContext, ToolRegistry};
pub use tool::{ToolAnnotations, ToolDescriptor, ToolHandler};
