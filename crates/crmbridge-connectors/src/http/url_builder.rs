//! URL building utilities for vendor endpoints

use crate::error::{ConnectorError, ConnectorResult};
use url::Url;

/// URL builder that handles path templates, joining and query encoding
pub struct UrlBuilder;

impl UrlBuilder {
    /// Join a base URL and a path, keeping the base path.
    ///
    /// Vendor base URLs carry an API prefix (`/v1`, `/api/v2`) that must
    /// survive, so the path is always appended:
    /// - `join("https://api.example.com/v1", "/persons")` -> `https://api.example.com/v1/persons`
    /// - `join("https://api.example.com/v1/", "persons")` -> `https://api.example.com/v1/persons`
    pub fn join(base_url: &str, path: &str) -> ConnectorResult<Url> {
        let joined = if path.is_empty() {
            base_url.to_string()
        } else {
            format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
        };
        Url::parse(&joined).map_err(|e| {
            ConnectorError::InvalidConfig(format!("Invalid URL '{}': {}", joined, e))
        })
    }

    /// Join base URL and path, then append query pairs in order
    pub fn join_with_query(
        base_url: &str,
        path: &str,
        query_params: &[(String, String)],
    ) -> ConnectorResult<Url> {
        let mut url = Self::join(base_url, path)?;
        if !query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query_params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Substitute `{name}` placeholders, percent-encoding each value.
    ///
    /// `lookup` returns the raw value for a placeholder; a placeholder without
    /// a value is an error so no literal `{name}` or empty segment is sent.
    pub fn expand_path<F>(template: &str, mut lookup: F) -> ConnectorResult<String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                ConnectorError::InvalidConfig(format!("Unclosed placeholder in path '{}'", template))
            })?;
            let name = &after[..end];
            let value = lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    ConnectorError::InvalidRequest(format!("missing path parameter '{}'", name))
                })?;
            out.push_str(&urlencoding::encode(&value));
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Names of the `{name}` placeholders in a path template
    pub fn placeholders(template: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(after[..end].to_string());
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_keeps_base_path() {
        assert_eq!(
            UrlBuilder::join("https://api.pipedrive.com/v1", "/persons").unwrap().as_str(),
            "https://api.pipedrive.com/v1/persons"
        );
        assert_eq!(
            UrlBuilder::join("https://api.pipedrive.com/v1/", "persons").unwrap().as_str(),
            "https://api.pipedrive.com/v1/persons"
        );
        assert_eq!(
            UrlBuilder::join("https://api.example.com", "").unwrap().as_str(),
            "https://api.example.com/"
        );
    }

    #[test]
    fn test_join_with_query_preserves_order() {
        let params = vec![
            ("term".to_string(), "acme corp".to_string()),
            ("limit".to_string(), "10".to_string()),
        ];
        let url = UrlBuilder::join_with_query("https://api.example.com/v1", "/search", &params)
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/search?term=acme+corp&limit=10");
    }

    #[test]
    fn test_no_query_means_no_question_mark() {
        let url = UrlBuilder::join_with_query("https://api.example.com", "/deals", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/deals");
    }

    #[test]
    fn test_expand_path_encodes_segments() {
        let path = UrlBuilder::expand_path("/persons/{id}/deals", |name| {
            (name == "id").then(|| "a b/c".to_string())
        })
        .unwrap();
        assert_eq!(path, "/persons/a%20b%2Fc/deals");
    }

    #[test]
    fn test_expand_path_missing_value() {
        let err = UrlBuilder::expand_path("/tickets/{ticketId}", |_| None).unwrap_err();
        assert!(err.to_string().contains("ticketId"));
    }

    #[test]
    fn test_expand_path_rejects_empty_value() {
        assert!(UrlBuilder::expand_path("/tickets/{ticketId}", |_| Some(String::new())).is_err());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            UrlBuilder::placeholders("/crm/v3/objects/{objectType}/{objectId}"),
            vec!["objectType".to_string(), "objectId".to_string()]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(UrlBuilder::join("not-a-url", "/path").is_err());
        assert!(UrlBuilder::join("", "/path").is_err());
    }
}
