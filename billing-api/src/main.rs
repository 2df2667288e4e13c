use anyhow::Context;
use log::info;

use billing_api::build_router;
use billing_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ApiConfig::from_env()?;
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!("billing API listening on {}", addr);
    info!("  - POST /api/billing");
    info!("  - GET  /health");

    axum::serve(listener, build_router()).await?;
    Ok(())
}
