//! SHELF application library
//!
//! Registers the application modules and runs the HTTP service lifecycle.

pub mod modules;

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every application module.
pub fn registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry)?;
    Ok(registry)
}

/// Initialize and start all modules, serve HTTP until shutdown, then stop the modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "shelf-app bootstrap starting"
    );

    let registry = registry().context("failed to register modules")?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;
    tracing::info!("shelf-app bootstrap complete");

    let served = shelf_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
