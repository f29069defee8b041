use anyhow::Result;
use job_scout::{start_web_server, EnvironmentConfig};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("ROCKET_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;

    let environment = EnvironmentConfig::load()?;
    environment.ensure_directories().await?;

    info!("Starting job-search assistant API server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Data: {}", environment.data_path.display());
    info!("Database: {}", environment.database_path.display());
    info!("Job catalog: {}", environment.jobs_catalog_path.display());
    info!("Server: http://0.0.0.0:{}", port);

    start_web_server(environment, port).await
}
