use std::sync::Arc;

use anyhow::Context;

use sale_revoke_api::{app, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sale_revoke_observability::init();

    let config = AppConfig::from_env()?;
    let (services, demo) = app::build_services(config.variant, config.seed_demo)?;
    if let Some(demo) = &demo {
        tracing::info!(
            revocable = %demo.revocable,
            blocked = %demo.blocked,
            with_pending = %demo.with_pending,
            "seeded demo orders"
        );
    }

    let router = app::build_app(Arc::new(services));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, variant = %config.variant, "listening");

    axum::serve(listener, router).await?;
    Ok(())
}
