//! Registry for assistant actions and context providers

use crate::{ActionSpec, AssistantAction, ContextProvider};
use lens_core::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry holding everything an assistant may see or do
pub struct AssistantSurface {
    actions: RwLock<HashMap<String, Arc<dyn AssistantAction>>>,
    contexts: RwLock<HashMap<String, Arc<dyn ContextProvider>>>,
}

impl Default for AssistantSurface {
    fn default() -> Self {
        Self {
            actions: RwLock::new(HashMap::new()),
            contexts: RwLock::new(HashMap::new()),
        }
    }
}

impl AssistantSurface {
    /// Create a new empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an invocable action
    pub fn register_action(&self, action: Arc<dyn AssistantAction>) {
        let mut actions = self.actions.write().unwrap_or_else(|e| e.into_inner());
        actions.insert(action.name().to_string(), action);
    }

    /// Register a context provider
    pub fn register_context(&self, provider: Arc<dyn ContextProvider>) {
        let mut contexts = self.contexts.write().unwrap_or_else(|e| e.into_inner());
        contexts.insert(provider.name().to_string(), provider);
    }

    /// Get an action by name
    pub fn action(&self, name: &str) -> Option<Arc<dyn AssistantAction>> {
        let actions = self.actions.read().unwrap_or_else(|e| e.into_inner());
        actions.get(name).cloned()
    }

    /// Get a context provider by name
    pub fn context(&self, name: &str) -> Option<Arc<dyn ContextProvider>> {
        let contexts = self.contexts.read().unwrap_or_else(|e| e.into_inner());
        contexts.get(name).cloned()
    }

    /// Invoke a registered action by name
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        // Clone the handle out so the lock is not held across the await
        let action = self
            .action(name)
            .ok_or_else(|| Error::UnknownAction(name.to_string()))?;

        tracing::debug!(action = name, "invoking assistant action");
        action.execute(params).await
    }

    /// Read a single named context snapshot
    pub async fn read_context(&self, name: &str) -> Result<Value> {
        let provider = self
            .context(name)
            .ok_or_else(|| Error::UnknownContext(name.to_string()))?;
        Ok(provider.snapshot().await)
    }

    /// Snapshot every registered context provider into one name/value map
    pub async fn snapshot_all(&self) -> Value {
        let providers: Vec<Arc<dyn ContextProvider>> = {
            let contexts = self.contexts.read().unwrap_or_else(|e| e.into_inner());
            contexts.values().cloned().collect()
        };

        let mut map = Map::new();
        for provider in providers {
            map.insert(provider.name().to_string(), provider.snapshot().await);
        }
        Value::Object(map)
    }

    /// Describe all registered actions for the assistant runtime
    pub fn describe_actions(&self) -> Vec<ActionSpec> {
        let actions = self.actions.read().unwrap_or_else(|e| e.into_inner());
        actions
            .values()
            .map(|action| ActionSpec::describe(action.as_ref()))
            .collect()
    }

    /// Number of registered actions
    pub fn action_count(&self) -> usize {
        let actions = self.actions.read().unwrap_or_else(|e| e.into_inner());
        actions.len()
    }

    /// Number of registered context providers
    pub fn context_count(&self) -> usize {
        let contexts = self.contexts.read().unwrap_or_else(|e| e.into_inner());
        contexts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoAction;

    #[async_trait]
    impl AssistantAction for EchoAction {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(params)
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its input back"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    struct StaticContext;

    #[async_trait]
    impl ContextProvider for StaticContext {
        fn name(&self) -> &str {
            "greeting"
        }

        fn description(&self) -> &str {
            "A fixed greeting"
        }

        async fn snapshot(&self) -> Value {
            json!("hello")
        }
    }

    #[tokio::test]
    async fn test_register_and_invoke() {
        let surface = AssistantSurface::new();
        surface.register_action(Arc::new(EchoAction));

        assert_eq!(surface.action_count(), 1);

        let result = surface.invoke("echo", json!({ "x": 1 })).await.unwrap();
        assert_eq!(result, json!({ "x": 1 }));
    }

    #[tokio::test]
    async fn test_invoke_unknown_action() {
        let surface = AssistantSurface::new();
        let err = surface.invoke("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::UnknownAction(_)));
    }

    #[tokio::test]
    async fn test_context_snapshot() {
        let surface = AssistantSurface::new();
        surface.register_context(Arc::new(StaticContext));

        let value = surface.read_context("greeting").await.unwrap();
        assert_eq!(value, json!("hello"));

        let all = surface.snapshot_all().await;
        assert_eq!(all["greeting"], json!("hello"));
    }

    #[tokio::test]
    async fn test_read_unknown_context() {
        let surface = AssistantSurface::new();
        let err = surface.read_context("missing").await.unwrap_err();
        assert!(matches!(err, Error::UnknownContext(_)));
    }

    #[test]
    fn test_describe_actions() {
        let surface = AssistantSurface::new();
        surface.register_action(Arc::new(EchoAction));

        let specs = surface.describe_actions();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "echo");
        assert_eq!(specs[0].input_schema["type"], "object");
    }
}
