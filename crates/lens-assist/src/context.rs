//! Context provider trait definition

use async_trait::async_trait;
use serde_json::Value;

/// Trait for read-only view-state exposed to an assistant
///
/// Implementations must read the backing state at call time rather than
/// caching a value, so the assistant always observes the latest state.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Get the provider's name
    ///
    /// Must be unique within an AssistantSurface
    fn name(&self) -> &str;

    /// Get the provider's description
    fn description(&self) -> &str;

    /// Take a snapshot of the current value
    async fn snapshot(&self) -> Value;
}
