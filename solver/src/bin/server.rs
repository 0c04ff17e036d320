use anyhow::{Context, Result};

use lowpay::server::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    lowpay::env_config::init_tracing("info");
    let port = lowpay::env_config::server_port();
    lowpay::env_config::init_rayon_threads(None);

    let app = create_router();
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("binding port {}", port))?;
    tracing::info!(port, "server is running, press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("stopping server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
    }
}
