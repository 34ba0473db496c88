mod modules;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use biblio_auth::{Authenticator, SessionAuthenticator};
use biblio_kernel::settings::Settings;
use biblio_kernel::{InitCtx, ModuleRegistry};

/// Library catalog CRUD API server
#[derive(Parser, Debug)]
#[command(name = "biblio", version, about)]
struct Cli {
    /// Override the listen host from configuration
    #[arg(long)]
    host: Option<String>,
    /// Override the listen port from configuration
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load biblio settings")?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    biblio_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "biblio bootstrap starting");

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let authenticator: Arc<dyn Authenticator> = Arc::new(SessionAuthenticator::new(
        settings.auth.session_tokens.clone(),
    ));

    tracing::info!(modules = registry.module_count(), "biblio bootstrap complete");

    biblio_http::start_server(&registry, authenticator, &settings).await?;

    registry.stop_all().await?;

    Ok(())
}
