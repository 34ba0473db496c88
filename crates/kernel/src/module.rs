use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Core module trait that every biblio resource module implements
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module; doubles as the resource path segment
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before the server binds
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes will be mounted under `/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON
    /// Will be merged with other modules' specs
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Start background tasks for this module
    /// Called after every module has been initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
