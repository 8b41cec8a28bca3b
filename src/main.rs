use agripulse::config::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("agripulse=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();
    agripulse::server::start(&config).await
}
