//! Vendor authentication styles

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// How a vendor credential is attached to the request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthStyle {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// Custom header carrying the raw token (e.g. `X-API-Key`)
    Header { name: String },
    /// Query parameter carrying the raw token (e.g. `api_token`)
    Query { name: String },
    /// HTTP Basic with the token as user name and a fixed password
    Basic {
        #[serde(default)]
        password: String,
    },
    #[default]
    None,
}

/// Where the credential ended up after applying an [`AuthStyle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedAuth {
    Header(String, String),
    Query(String, String),
    Nothing,
}

impl AuthStyle {
    /// Map a token onto a header or query parameter
    pub fn apply(&self, token: Option<&str>) -> AppliedAuth {
        let token = match token {
            Some(token) => token,
            None => return AppliedAuth::Nothing,
        };
        match self {
            AuthStyle::Bearer => {
                AppliedAuth::Header("Authorization".to_string(), format!("Bearer {}", token))
            }
            AuthStyle::Header { name } => AppliedAuth::Header(name.clone(), token.to_string()),
            AuthStyle::Query { name } => AppliedAuth::Query(name.clone(), token.to_string()),
            AuthStyle::Basic { password } => {
                let encoded = general_purpose::STANDARD.encode(format!("{}:{}", token, password));
                AppliedAuth::Header("Authorization".to_string(), format!("Basic {}", encoded))
            }
            AuthStyle::None => AppliedAuth::Nothing,
        }
    }
}
