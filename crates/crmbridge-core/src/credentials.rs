//! Vendor credentials
//!
//! A vendor integration either receives its credential once at startup (from
//! the process environment) or expects it as an argument of every tool call.
//! Which one applies is fixed per integration by its [`CredentialSource`].

use crate::error::{CoreError, CoreResult};
use crate::schema::ValidatedInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a vendor credential comes from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    /// Read once from the named environment variable at startup
    Env { var: String },
    /// Supplied per call as the named tool argument
    Argument { field: String },
    /// The vendor endpoint needs no credential
    #[default]
    None,
}

/// Process-wide, read-only credential state
#[derive(Clone, Default)]
pub struct Credentials {
    preloaded: Option<String>,
}

impl Credentials {
    /// No preloaded credential (per-call or anonymous vendors)
    pub fn none() -> Self {
        Self { preloaded: None }
    }

    /// Credential loaded at startup
    pub fn preloaded(token: impl Into<String>) -> Self {
        Self { preloaded: Some(token.into()) }
    }

    pub fn has_preloaded(&self) -> bool {
        self.preloaded.is_some()
    }

    /// Resolve the credential for one invocation
    pub fn resolve(
        &self,
        source: &CredentialSource,
        input: &ValidatedInput,
    ) -> CoreResult<Option<String>> {
        match source {
            CredentialSource::None => Ok(None),
            CredentialSource::Env { var } => self
                .preloaded
                .clone()
                .map(Some)
                .ok_or_else(|| CoreError::MissingCredential(format!("{} is not set", var))),
            CredentialSource::Argument { field } => match input.get_str(field) {
                Some(token) if !token.trim().is_empty() => Ok(Some(token.to_string())),
                _ => Err(CoreError::MissingCredential(format!(
                    "argument '{}' is required",
                    field
                ))),
            },
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("preloaded", &self.preloaded.as_ref().map(|_| crate::SANITIZED_PLACEHOLDER))
            .finish()
    }
}
