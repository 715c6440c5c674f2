//! Scheduling engine HTTP server.
//!
//! Usage:
//!     schedule-engine --config config/colombia --bind 127.0.0.1:3000

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schedule_engine::api::{AppState, create_router};
use schedule_engine::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "schedule-engine", about = "Shift validation and request approval service")]
struct Args {
    /// Directory holding labor.yaml and business.yaml
    #[arg(long, env = "SCHEDULE_ENGINE_CONFIG", default_value = "config/colombia")]
    config: PathBuf,

    /// Address to listen on
    #[arg(long, env = "SCHEDULE_ENGINE_BIND", default_value = "127.0.0.1:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schedule_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    tracing::info!(
        config = %args.config.display(),
        currency = %config.business().currency,
        max_weekly_hours = %config.labor().max_weekly_hours,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!(bind = %args.bind, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
