//! Ordered tool registry and the invocation boundary

use crate::error::{RegistryError, RegistryResult};
use crate::tool::ToolDescriptor;
use crmbridge_core::{Envelope, ValidationFailure};
use futures::FutureExt;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::Instrument;

/// Per-invocation context used for tracing
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub invocation_id: String,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self { invocation_id: uuid::Uuid::new_v4().to_string() }
    }

    pub fn with_id(invocation_id: impl Into<String>) -> Self {
        Self { invocation_id: invocation_id.into() }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered mapping from tool name to descriptor.
///
/// Populated at startup and read-only afterwards; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: IndexMap::new() }
    }

    /// Add a tool; names are unique
    pub fn register(&mut self, descriptor: ToolDescriptor) -> RegistryResult<()> {
        if self.tools.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }
        tracing::debug!(tool = %descriptor.name, "registered tool");
        self.tools.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn register_all<I>(&mut self, descriptors: I) -> RegistryResult<()>
    where
        I: IntoIterator<Item = ToolDescriptor>,
    {
        descriptors.into_iter().try_for_each(|d| self.register(d))
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Tools in registration order
    pub fn tools(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate and run a tool.
    ///
    /// Only an unknown name is an `Err`; validation failures, handler errors
    /// and handler panics all come back as error envelopes.
    pub async fn invoke(&self, name: &str, raw_input: JsonValue) -> RegistryResult<Envelope> {
        self.invoke_with_context(name, raw_input, InvocationContext::new()).await
    }

    pub async fn invoke_with_context(
        &self,
        name: &str,
        raw_input: JsonValue,
        context: InvocationContext,
    ) -> RegistryResult<Envelope> {
        let descriptor =
            self.tools.get(name).ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;

        let span = tracing::info_span!("tool", tool = %name, invocation_id = %context.invocation_id);
        Ok(Self::run(descriptor, raw_input).instrument(span).await)
    }

    /// Invocation boundary used by the transport: always yields an envelope
    pub async fn call(&self, name: &str, raw_input: JsonValue) -> Envelope {
        match self.invoke(name, raw_input).await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(tool = %name, error = %err, "tool call rejected");
                Envelope::error(err.to_string())
            }
        }
    }

    async fn run(descriptor: &ToolDescriptor, raw_input: JsonValue) -> Envelope {
        let started = Instant::now();

        let input = match descriptor.input_schema.validate(&raw_input) {
            Ok(input) => input,
            Err(failures) => {
                tracing::info!(failures = failures.len(), "invalid arguments");
                return Envelope::error(validation_message(&descriptor.name, &failures));
            }
        };

        let outcome = AssertUnwindSafe(descriptor.handler.call(input)).catch_unwind().await;
        let envelope = match outcome {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(err)) => Envelope::error(err.to_string()),
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                tracing::error!(reason = %reason, "tool handler panicked");
                Envelope::error(format!("Error: tool handler failed: {}", reason))
            }
        };

        tracing::info!(
            is_error = envelope.is_error(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tool call finished"
        );
        envelope
    }
}

fn validation_message(tool: &str, failures: &[ValidationFailure]) -> String {
    let details: Vec<String> = failures.iter().map(ToString::to_string).collect();
    format!("Invalid arguments for tool '{}': {}", tool, details.join("; "))
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
