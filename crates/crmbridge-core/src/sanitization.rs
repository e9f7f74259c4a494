//! Utilities for masking credentials in logs and error messages

use serde_json::{Map, Value as JsonValue};

/// Field names that always hold secrets (compared case-insensitively)
const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "authorization",
    "api_key",
    "apikey",
    "api_token",
    "apitoken",
    "access_token",
    "accesstoken",
    "secret",
];

/// Substrings that mark a field as sensitive (compared case-insensitively)
const SENSITIVE_PATTERNS: &[&str] = &["token", "secret", "password", "apikey", "api_key"];

/// Sanitized placeholder for sensitive values
pub const SANITIZED_PLACEHOLDER: &str = "***REDACTED***";

/// Check if a field name indicates sensitive data
pub fn is_sensitive_field(field_name: &str) -> bool {
    let field_lower = field_name.to_lowercase();

    if SENSITIVE_FIELDS.iter().any(|&sensitive| field_lower == sensitive) {
        return true;
    }

    SENSITIVE_PATTERNS.iter().any(|&pattern| field_lower.contains(pattern))
}

/// Sanitize a JSON value by replacing sensitive fields with placeholders
pub fn sanitize_json_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let sanitized: Map<String, JsonValue> = map
                .iter()
                .map(|(key, val)| {
                    let val = if is_sensitive_field(key) {
                        JsonValue::String(SANITIZED_PLACEHOLDER.to_string())
                    } else {
                        sanitize_json_value(val)
                    };
                    (key.clone(), val)
                })
                .collect();
            JsonValue::Object(sanitized)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sanitize_json_value).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sensitive_field_detection() {
        assert!(is_sensitive_field("accessToken"));
        assert!(is_sensitive_field("api_token"));
        assert!(is_sensitive_field("Authorization"));
        assert!(!is_sensitive_field("email"));
        assert!(!is_sensitive_field("ticketId"));
    }

    #[test]
    fn test_nested_sanitization() {
        let value = json!({
            "email": "a@b.com",
            "apiToken": "abc",
            "nested": [{"client_secret": "x", "name": "n"}]
        });
        let sanitized = sanitize_json_value(&value);
        assert_eq!(sanitized["email"], "a@b.com");
        assert_eq!(sanitized["apiToken"], SANITIZED_PLACEHOLDER);
        assert_eq!(sanitized["nested"][0]["client_secret"], SANITIZED_PLACEHOLDER);
        assert_eq!(sanitized["nested"][0]["name"], "n");
    }
}
