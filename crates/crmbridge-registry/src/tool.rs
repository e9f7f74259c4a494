//! Tool descriptors and the handler seam

use crate::error::RegistryResult;
use async_trait::async_trait;
use crmbridge_core::{Envelope, InputSchema, ValidatedInput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Runtime handler behind a tool
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with input that already passed schema validation.
    ///
    /// An `Err` is turned into an error envelope by the registry.
    async fn call(&self, input: ValidatedInput) -> RegistryResult<Envelope>;
}

/// Behavior hints advertised alongside a tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub read_only_hint: bool,
    pub destructive_hint: bool,
    pub idempotent_hint: bool,
    pub open_world_hint: bool,
}

/// A named, schema-validated callable operation
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub title: Option<String>,
    pub description: String,
    pub input_schema: InputSchema,
    pub annotations: Option<ToolAnnotations>,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: description.into(),
            input_schema,
            annotations: None,
            handler,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}
