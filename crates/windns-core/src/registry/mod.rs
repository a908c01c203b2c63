//! Plugin-based executor registry
//!
//! The registry lets executor crates register themselves by type name, so
//! the binary can build whichever executor the configuration asks for.
//!
//! ## Registration
//!
//! ```rust,ignore
//! // In the windns-powershell crate
//! pub fn register(registry: &ExecutorRegistry) {
//!     registry.register_executor("powershell", Box::new(PowerShellFactory));
//! }
//! ```

use crate::config::ExecutorConfig;
use crate::error::{Error, Result};
use crate::traits::{CommandExecutor, CommandExecutorFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Executor registry for plugin-based executor creation
///
/// Interior mutability with RwLock allows concurrent reads and exclusive
/// writes.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: RwLock<HashMap<String, Box<dyn CommandExecutorFactory>>>,
}

impl ExecutorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor factory under `name`, replacing any previous one
    pub fn register_executor(
        &self,
        name: impl Into<String>,
        factory: Box<dyn CommandExecutorFactory>,
    ) {
        let mut executors = self
            .executors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        executors.insert(name.into(), factory);
    }

    /// Create an executor from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn CommandExecutor>)`: Created executor
    /// - `Err(Error)`: If the type is not registered or creation fails
    pub fn create_executor(&self, config: &ExecutorConfig) -> Result<Box<dyn CommandExecutor>> {
        let executor_type = config.type_name();
        let executors = self
            .executors
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let factory = executors
            .get(executor_type)
            .ok_or_else(|| Error::config(format!("Unknown executor type: {}", executor_type)))?;

        factory.create(config)
    }

    /// List all registered executor types
    pub fn list_executors(&self) -> Vec<String> {
        let executors = self
            .executors
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        executors.keys().cloned().collect()
    }

    /// Check if an executor type is registered
    pub fn has_executor(&self, name: &str) -> bool {
        let executors = self
            .executors
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        executors.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionProfile;
    use async_trait::async_trait;

    struct EchoExecutor;

    #[async_trait]
    impl CommandExecutor for EchoExecutor {
        async fn execute(&self, command: &str, _profile: &ConnectionProfile) -> Result<String> {
            Ok(command.to_string())
        }

        fn executor_name(&self) -> &'static str {
            "echo"
        }
    }

    struct EchoFactory;

    impl CommandExecutorFactory for EchoFactory {
        fn create(&self, _config: &ExecutorConfig) -> Result<Box<dyn CommandExecutor>> {
            Ok(Box::new(EchoExecutor))
        }
    }

    fn echo_config() -> ExecutorConfig {
        ExecutorConfig::Custom {
            factory: "echo".to_string(),
            config: serde_json::json!({}),
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ExecutorRegistry::new();
        assert!(!registry.has_executor("echo"));

        registry.register_executor("echo", Box::new(EchoFactory));

        assert!(registry.has_executor("echo"));
        assert!(registry.list_executors().contains(&"echo".to_string()));
    }

    #[test]
    fn test_create_registered_executor() {
        let registry = ExecutorRegistry::new();
        registry.register_executor("echo", Box::new(EchoFactory));

        let executor = registry.create_executor(&echo_config()).unwrap();
        assert_eq!(executor.executor_name(), "echo");

        let profile = ConnectionProfile::new("admin", "pw", "dns01");
        let output = tokio_test::block_on(executor.execute("Get-DnsServerZone", &profile)).unwrap();
        assert_eq!(output, "Get-DnsServerZone");
    }

    #[test]
    fn test_unknown_executor_type() {
        let registry = ExecutorRegistry::new();
        let err = registry.create_executor(&echo_config()).err().unwrap();
        assert!(err.to_string().contains("Unknown executor type: echo"));
    }
}
