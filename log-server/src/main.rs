use anyhow::Result;
use logvault_server::bootstrap;

#[tokio::main]
async fn main() -> Result<()> {
    // Bootstrap the application (setup logging, storage, API router)
    let app = bootstrap::setup().await?;

    let listener = tokio::net::TcpListener::bind(&app.bind_address).await?;
    tracing::info!("HTTP server listening on http://{}", app.bind_address);

    axum::serve(listener, app.router).await?;

    drop(app.log_guard);
    Ok(())
}
