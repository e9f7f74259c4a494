//! Environment variable resolution with default value support
//!
//! Values are looked up through an [`EnvSource`] so callers decide whether the
//! process environment or a fixed map is consulted.

use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during environment variable resolution
#[derive(Debug, Error)]
pub enum EnvResolverError {
    #[error("Environment variable '{0}' not found and no default provided")]
    VarNotFound(String),
    #[error("Invalid variable syntax: '{0}'. Expected ${{VAR}} or ${{VAR:default}}")]
    InvalidSyntax(String),
}

/// Read-only view of environment variables
pub trait EnvSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

const PLACEHOLDER_PATTERN: &str = r"\$\{([^}:]+)(?::([^}]*))?\}";

/// Resolver for `${VAR}` and `${VAR:default}` placeholders
pub struct EnvResolver<'a> {
    source: &'a dyn EnvSource,
}

impl<'a> EnvResolver<'a> {
    pub fn new(source: &'a dyn EnvSource) -> Self {
        Self { source }
    }

    /// Look up a variable, treating blank values as unset
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.source.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Resolve every placeholder in `input`
    pub fn resolve_str(&self, input: &str) -> Result<String, EnvResolverError> {
        if !input.contains("${") {
            return Ok(input.to_string());
        }

        let re = Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|e| EnvResolverError::InvalidSyntax(e.to_string()))?;

        let mut result = String::with_capacity(input.len());
        let mut last = 0;
        for caps in re.captures_iter(input) {
            let (Some(full), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let var_name = name.as_str().trim();
            let value = match (self.lookup(var_name), caps.get(2)) {
                (Some(value), _) => value,
                (None, Some(default)) => default.as_str().to_string(),
                (None, None) => return Err(EnvResolverError::VarNotFound(var_name.to_string())),
            };
            result.push_str(&input[last..full.start()]);
            result.push_str(&value);
            last = full.end();
        }
        result.push_str(&input[last..]);

        if result.contains("${") {
            return Err(EnvResolverError::InvalidSyntax(input.to_string()));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_resolves_variable() {
        let source = env(&[("FRESHDESK_DOMAIN", "acme")]);
        let resolver = EnvResolver::new(&source);
        assert_eq!(
            resolver.resolve_str("https://${FRESHDESK_DOMAIN}.freshdesk.com/api/v2").unwrap(),
            "https://acme.freshdesk.com/api/v2"
        );
    }

    #[test]
    fn test_default_value_used_when_unset() {
        let source = env(&[]);
        let resolver = EnvResolver::new(&source);
        assert_eq!(
            resolver.resolve_str("https://${API_HOST:api.example.com}/v1").unwrap(),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_missing_variable_without_default() {
        let source = env(&[]);
        let err = EnvResolver::new(&source).resolve_str("https://${FRESHDESK_DOMAIN}.freshdesk.com").unwrap_err();
        assert!(matches!(err, EnvResolverError::VarNotFound(name) if name == "FRESHDESK_DOMAIN"));
    }

    #[test]
    fn test_blank_variable_counts_as_unset() {
        let source = env(&[("HOST", "  ")]);
        let resolver = EnvResolver::new(&source);
        assert_eq!(resolver.resolve_str("${HOST:fallback}").unwrap(), "fallback");
        assert!(resolver.lookup("HOST").is_none());
    }

    #[test]
    fn test_unclosed_placeholder_rejected() {
        let source = env(&[]);
        assert!(matches!(
            EnvResolver::new(&source).resolve_str("https://${BROKEN/v1"),
            Err(EnvResolverError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn test_plain_string_untouched() {
        let source = env(&[]);
        assert_eq!(
            EnvResolver::new(&source).resolve_str("https://api.close.com/api/v1").unwrap(),
            "https://api.close.com/api/v1"
        );
    }
}
