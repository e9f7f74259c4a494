use crmbridge_core::CoreError;

/// Errors raised while building or dispatching a vendor request.
///
/// The `Transport`, `VendorApi` and `Decode` variants render exactly as the
/// text of the error envelope returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Error: {0}")]
    Transport(String),

    #[error("API Error ({status}): {body}")]
    VendorApi { status: u16, body: String },

    #[error("Error: Failed to parse response as JSON: {0}")]
    Decode(String),

    #[error("Error: Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Error: Missing credential: {0}")]
    Credential(String),

    #[error("Error: Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<CoreError> for ConnectorError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingCredential(msg) => ConnectorError::Credential(msg),
            CoreError::Invalid(msg) | CoreError::Schema(msg) => ConnectorError::InvalidRequest(msg),
            CoreError::Serde(msg) | CoreError::Other(msg) => ConnectorError::InvalidConfig(msg),
        }
    }
}

impl From<ConnectorError> for CoreError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Credential(msg) => CoreError::MissingCredential(msg),
            ConnectorError::InvalidConfig(msg) | ConnectorError::InvalidRequest(msg) => {
                CoreError::Invalid(msg)
            }
            other => CoreError::Other(other.to_string()),
        }
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
