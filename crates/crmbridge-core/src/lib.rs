pub mod credentials;
pub mod envelope;
pub mod error;
pub mod sanitization;
pub mod schema;

// Re-export commonly used types
pub use credentials::{CredentialSource, Credentials};
pub use envelope::{ContentBlock, Envelope};
pub use error::{CoreError, CoreResult};
pub use sanitization::{is_sensitive_field, sanitize_json_value, SANITIZED_PLACEHOLDER};
pub use schema::{
    InputSchema, ParamLocation, ParamSpec, ParamType, Refinement, ValidatedInput,
    ValidationFailure,
};
