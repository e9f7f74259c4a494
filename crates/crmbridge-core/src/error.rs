use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid: {0}")]
    Invalid(String),
    #[error("schema: {0}")]
    Schema(String),
    #[error("missing credential: {0}")]
    MissingCredential(String),
    #[error("serde: {0}")]
    Serde(String),
    #[error("other: {0}")]
    Other(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
