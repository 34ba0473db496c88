//! HTTP server facade for biblio with Axum, error handling, and OpenAPI support.

use std::sync::Arc;

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use biblio_auth::Authenticator;
use biblio_kernel::ModuleRegistry;

pub mod error;
pub mod resource;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
pub async fn start_server(
    registry: &ModuleRegistry,
    authenticator: Arc<dyn Authenticator>,
    settings: &biblio_kernel::settings::Settings,
) -> anyhow::Result<()> {
    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, authenticator, settings);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted.
///
/// Middleware layers are applied after the routes so they wrap every
/// mounted module, the authentication extension included.
pub fn build_router(
    registry: &ModuleRegistry,
    authenticator: Arc<dyn Authenticator>,
    settings: &biblio_kernel::settings::Settings,
) -> Router {
    let mut router_builder = RouterBuilder::new();

    // Add health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Mount module routes
    for module in registry.modules() {
        let module_name = module.name();
        let module_router = module.routes();

        tracing::info!(
            module = module_name,
            "mounting module routes under /{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module_router);
    }

    // Add OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    // Global middlewares, wrapping everything mounted above
    router_builder = router_builder
        .with_auth(authenticator)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms);

    router_builder.build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Request ID generator for tracing
#[derive(Clone)]
pub(crate) struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
