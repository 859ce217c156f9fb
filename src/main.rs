use anyhow::Result;
use tracing_subscriber::EnvFilter;

use fireberry_mcp::api::FireberryClient;
use fireberry_mcp::config::AppConfig;
use fireberry_mcp::server::McpServer;
use fireberry_mcp::tools::create_default_router;

fn init_logging(config: &AppConfig) {
    // Stdout carries protocol frames; all logging goes to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config);

    tracing::info!(
        base_url = %config.base_url,
        "starting fireberry-mcp (stdio)"
    );

    let client = FireberryClient::new(&config.base_url, &config.token_id);
    let router = create_default_router(client);
    let server = McpServer::new(router);

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received shutdown signal");
            Ok(())
        }
    }
}
