//! Action trait definition

use async_trait::async_trait;
use lens_core::Result;
use serde::Serialize;
use serde_json::Value;

/// Trait for operations an assistant can invoke
///
/// Each action must provide a name, a description, and a JSON schema for its
/// input. The assistant uses the schema to produce valid invocations.
#[async_trait]
pub trait AssistantAction: Send + Sync {
    /// Execute the action with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Action input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// A human-readable result as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the action's name
    ///
    /// Must be unique within an AssistantSurface
    fn name(&self) -> &str;

    /// Get the action's description
    ///
    /// This description helps the assistant decide when to invoke the action
    fn description(&self) -> &str;

    /// Get the action's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}

/// Serializable description of a registered action, suitable for
/// advertising the surface to an assistant runtime.
#[derive(Debug, Clone, Serialize)]
pub struct ActionSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ActionSpec {
    /// Build a spec from a registered action
    pub fn describe(action: &dyn AssistantAction) -> Self {
        Self {
            name: action.name().to_string(),
            description: action.description().to_string(),
            input_schema: action.input_schema(),
        }
    }
}
