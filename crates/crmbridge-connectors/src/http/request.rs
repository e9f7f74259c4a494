//! Request adapter: validated tool input to a concrete vendor HTTP request

use super::auth::AppliedAuth;
use super::body_builder::BodyBuilder;
use super::endpoint::{EndpointDescriptor, HttpMethod};
use super::url_builder::UrlBuilder;
use crate::error::ConnectorResult;
use crmbridge_core::{is_sensitive_field, Credentials, ParamLocation, ValidatedInput, SANITIZED_PLACEHOLDER};
use serde_json::Value as JsonValue;
use url::Url;

/// A fully resolved vendor request, ready for a transport
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL with credential-like query values masked, for logs
    pub fn redacted_url(&self) -> String {
        let mut url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(_) => return self.url.clone(),
        };
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if is_sensitive_field(&k) { SANITIZED_PLACEHOLDER.to_string() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        url.to_string()
    }
}

/// Build the vendor request for one invocation.
///
/// Pure: no I/O, same input gives the same request. Absent optional fields
/// never appear in the query or body, and credential-carrying fields are
/// never forwarded as data.
pub fn build_request(
    endpoint: &EndpointDescriptor,
    input: &ValidatedInput,
    credentials: &Credentials,
) -> ConnectorResult<PreparedRequest> {
    let token = credentials.resolve(&endpoint.credential, input)?;

    let path = UrlBuilder::expand_path(&endpoint.path, |name| {
        let param = endpoint
            .params_in(ParamLocation::Path)
            .find(|p| p.wire_key() == name || p.name == name)?;
        input.get(&param.name).and_then(BodyBuilder::path_value)
    })?;

    let mut query = BodyBuilder::query_pairs(&endpoint.params, input);
    query.extend(endpoint.fixed_query.iter().cloned());

    let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
    match endpoint.auth.apply(token.as_deref()) {
        AppliedAuth::Header(name, value) => headers.push((name, value)),
        AppliedAuth::Query(name, value) => query.push((name, value)),
        AppliedAuth::Nothing => {}
    }

    let url = UrlBuilder::join_with_query(&endpoint.base_url, &path, &query)?;

    let body = if endpoint.method.has_body() {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Some(BodyBuilder::json_body(&endpoint.params, endpoint.fixed_body.as_ref(), input)?)
    } else {
        None
    };

    Ok(PreparedRequest { method: endpoint.method, url: url.to_string(), headers, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;
    use crate::http::auth::AuthStyle;
    use crmbridge_core::{CredentialSource, ParamSpec, ParamType};
    use serde_json::json;

    fn input(value: JsonValue) -> ValidatedInput {
        match value {
            JsonValue::Object(map) => ValidatedInput::from(map),
            _ => ValidatedInput::default(),
        }
    }

    fn pipedrive_get_person() -> EndpointDescriptor {
        EndpointDescriptor::new(HttpMethod::Get, "https://api.pipedrive.com/v1", "/persons/{id}")
            .with_params(vec![
                ParamSpec::new("id", ParamType::Integer).required().located(ParamLocation::Path),
            ])
            .with_auth(
                AuthStyle::Query { name: "api_token".into() },
                CredentialSource::Env { var: "PIPEDRIVE_API_TOKEN".into() },
            )
    }

    fn hubspot_create_contact() -> EndpointDescriptor {
        EndpointDescriptor::new(HttpMethod::Post, "https://api.hubapi.com", "/crm/v3/objects/contacts")
            .with_params(vec![
                ParamSpec::new("accessToken", ParamType::String)
                    .required()
                    .located(ParamLocation::Credential),
                ParamSpec::new("email", ParamType::String).wire("properties.email"),
                ParamSpec::new("firstname", ParamType::String).wire("properties.firstname"),
            ])
            .with_auth(AuthStyle::Bearer, CredentialSource::Argument { field: "accessToken".into() })
    }

    #[test]
    fn test_query_token_and_path_param() {
        let req = build_request(
            &pipedrive_get_person(),
            &input(json!({"id": 17})),
            &Credentials::preloaded("tok"),
        )
        .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.pipedrive.com/v1/persons/17?api_token=tok");
        assert!(req.body.is_none());
        assert!(req.header("Authorization").is_none());
        assert_eq!(req.header("accept"), Some("application/json"));
    }

    #[test]
    fn test_bearer_argument_not_forwarded_in_body() {
        let req = build_request(
            &hubspot_create_contact(),
            &input(json!({"accessToken": "pat-9", "email": "a@b.com"})),
            &Credentials::none(),
        )
        .unwrap();
        assert_eq!(req.url, "https://api.hubapi.com/crm/v3/objects/contacts");
        assert_eq!(req.header("Authorization"), Some("Bearer pat-9"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.body, Some(json!({"properties": {"email": "a@b.com"}})));
    }

    #[test]
    fn test_missing_env_credential_fails_before_any_request() {
        let err = build_request(&pipedrive_get_person(), &input(json!({"id": 1})), &Credentials::none())
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Credential(_)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let endpoint = hubspot_create_contact();
        let args = input(json!({"accessToken": "t", "email": "x@y.z", "firstname": "Ann"}));
        let a = build_request(&endpoint, &args, &Credentials::none()).unwrap();
        let b = build_request(&endpoint, &args, &Credentials::none()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_query_and_optional_query_fields() {
        let mut endpoint = EndpointDescriptor::new(HttpMethod::Get, "https://api.close.com/api/v1", "/lead/")
            .with_params(vec![
                ParamSpec::new("query", ParamType::String).located(ParamLocation::Query),
                ParamSpec::new("limit", ParamType::Integer).located(ParamLocation::Query),
            ]);
        endpoint.fixed_query = vec![("_fields".into(), "id,display_name".into())];
        let req = build_request(&endpoint, &input(json!({"limit": 5})), &Credentials::none()).unwrap();
        assert_eq!(req.url, "https://api.close.com/api/v1/lead/?limit=5&_fields=id%2Cdisplay_name");
    }

    #[test]
    fn test_redacted_url_masks_token() {
        let req = build_request(
            &pipedrive_get_person(),
            &input(json!({"id": 3})),
            &Credentials::preloaded("very-secret"),
        )
        .unwrap();
        let redacted = req.redacted_url();
        assert!(!redacted.contains("very-secret"));
        assert!(redacted.contains("api_token="));
    }
}
