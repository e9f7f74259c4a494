//! Response normalizer: one vendor round trip folded into an [`Envelope`]

use super::endpoint::Confirmation;
use super::request::PreparedRequest;
use super::transport::{HttpTransport, RawResponse, TransportError};
use crate::error::ConnectorError;
use crmbridge_core::{sanitize_json_value, Envelope, ValidatedInput};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Instant;

/// Sends prepared requests and normalizes every outcome
#[derive(Clone)]
pub struct HttpDispatcher {
    transport: Arc<dyn HttpTransport>,
}

impl HttpDispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Exactly one outbound request; never fails, never panics
    pub async fn execute(&self, request: &PreparedRequest) -> Envelope {
        self.execute_with_confirmation(request, None, &ValidatedInput::default()).await
    }

    /// Like [`execute`](Self::execute), prefixing a confirmation line on success
    pub async fn execute_with_confirmation(
        &self,
        request: &PreparedRequest,
        confirmation: Option<&Confirmation>,
        input: &ValidatedInput,
    ) -> Envelope {
        let started = Instant::now();
        let url = request.redacted_url();
        tracing::debug!(method = %request.method, url = %url, "sending vendor request");
        if let Some(body) = &request.body {
            tracing::trace!(body = %sanitize_json_value(body), "request body");
        }

        let outcome = self.transport.send(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(raw) if raw.is_success() => {
                tracing::info!(method = %request.method, url = %url, status = raw.status, elapsed_ms, "vendor request completed");
            }
            Ok(raw) => {
                tracing::warn!(method = %request.method, url = %url, status = raw.status, elapsed_ms, "vendor returned an error status");
            }
            Err(err) => {
                tracing::warn!(method = %request.method, url = %url, error = %err, elapsed_ms, "vendor request failed");
            }
        }

        normalize_response(outcome, confirmation, input)
    }
}

/// Fold a transport outcome into an envelope.
///
/// - transport failure: `Error: <message>`
/// - non-2xx: `API Error (<status>): <raw body>`
/// - 2xx with unparseable body: `Error: Failed to parse response as JSON: <reason>`
/// - 2xx: pretty JSON (empty body is `null`), optionally after a confirmation line
pub fn normalize_response(
    outcome: Result<RawResponse, TransportError>,
    confirmation: Option<&Confirmation>,
    input: &ValidatedInput,
) -> Envelope {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(err) => return Envelope::error(ConnectorError::Transport(err.to_string()).to_string()),
    };

    if !raw.is_success() {
        return Envelope::error(
            ConnectorError::VendorApi { status: raw.status, body: raw.body }.to_string(),
        );
    }

    let parsed: JsonValue = if raw.body.trim().is_empty() {
        JsonValue::Null
    } else {
        match serde_json::from_str(&raw.body) {
            Ok(value) => value,
            Err(e) => return Envelope::error(ConnectorError::Decode(e.to_string()).to_string()),
        }
    };

    match confirmation.and_then(|c| c.render(&parsed, input)) {
        Some(message) => Envelope::json_with_message(&message, &parsed),
        None => Envelope::json(&parsed),
    }
}
