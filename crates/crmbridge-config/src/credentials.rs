//! Startup credential loading

use crate::catalog::VendorCatalog;
use crate::env_resolver::{EnvResolver, EnvSource};
use crate::error::{ConfigError, ConfigResult};
use crmbridge_core::{CredentialSource, Credentials};

/// Build the read-only credential value for a vendor.
///
/// Vendors with an environment credential fail here when it is unset, so a
/// server never starts without it. Per-call and anonymous vendors get
/// [`Credentials::none`].
pub fn load_credentials(catalog: &VendorCatalog, env: &dyn EnvSource) -> ConfigResult<Credentials> {
    match &catalog.credential {
        CredentialSource::Env { var } => {
            let token = EnvResolver::new(env).lookup(var).ok_or_else(|| {
                ConfigError::MissingCredential { vendor: catalog.vendor.clone(), var: var.clone() }
            })?;
            tracing::debug!(vendor = %catalog.vendor, var = %var, "loaded credential from environment");
            Ok(Credentials::preloaded(token))
        }
        CredentialSource::Argument { .. } | CredentialSource::None => Ok(Credentials::none()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CatalogLoader;
    use std::collections::HashMap;

    #[test]
    fn test_env_credential_loaded() {
        let catalog = CatalogLoader::builtin("pipedrive").unwrap();
        let env: HashMap<String, String> =
            [("PIPEDRIVE_API_TOKEN".to_string(), "abc".to_string())].into();
        assert!(load_credentials(&catalog, &env).unwrap().has_preloaded());
    }

    #[test]
    fn test_missing_env_credential_names_variable() {
        let catalog = CatalogLoader::builtin("close").unwrap();
        let err = load_credentials(&catalog, &HashMap::<String, String>::new()).unwrap_err();
        assert!(matches!(&err, ConfigError::MissingCredential { var, .. } if var == "CLOSE_API_KEY"));
        assert!(err.to_string().contains("CLOSE_API_KEY"));
    }

    #[test]
    fn test_argument_vendor_needs_nothing_at_startup() {
        let catalog = CatalogLoader::builtin("hubspot").unwrap();
        let creds = load_credentials(&catalog, &HashMap::<String, String>::new()).unwrap();
        assert!(!creds.has_preloaded());
    }
}
