use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module};

/// Registry of resource modules, built once at startup and injected into
/// request handling. Modules are initialized and started in registration
/// order and stopped in reverse.
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new, empty module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules in registration order
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Get a module by name
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Get the number of registered modules
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Initialize all modules in registration order
    pub async fn init_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Start all modules in registration order
    pub async fn start_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("starting {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop all modules in reverse registration order
    pub async fn stop_all(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    struct TestModule {
        name: &'static str,
    }

    #[async_trait::async_trait]
    impl Module for TestModule {
        fn name(&self) -> &'static str {
            self.name
        }
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty());
        assert_eq!(registry.module_count(), 0);
    }

    #[test]
    fn test_module_lookup_by_name() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule { name: "genre" }));
        registry.register(Arc::new(TestModule { name: "author" }));

        assert_eq!(registry.module_count(), 2);
        assert!(registry.get_module("author").is_some());
        assert!(registry.get_module("publisher").is_none());
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule { name: "author" }));
        registry.register(Arc::new(TestModule { name: "genre" }));
        registry.register(Arc::new(TestModule { name: "book" }));

        let names: Vec<_> = registry.modules().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["author", "genre", "book"]);
    }

    #[tokio::test]
    async fn test_module_lifecycle() {
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        registry.register(Arc::new(TestModule { name: "test" }));

        registry.init_all(&ctx).await.unwrap();
        registry.start_all(&ctx).await.unwrap();
        registry.stop_all().await.unwrap();
    }
}
