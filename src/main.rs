use country_chat::bootstrap::build_app;
use country_chat::config::AppConfig;
use country_chat::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let app = build_app(&config)?;
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, environment = ?config.server.environment, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
