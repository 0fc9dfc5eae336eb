//! explore-item - Wikidata item aggregation service
//!
//! Renders item pages that merge contributor notes with live Wikidata data:
//! entity cards, truncated statement lists, recent scholarly articles and
//! on-demand neighborhood graphs.

use anyhow::Result;
use clap::Parser;
use explore_common::{config, db};
use explore_item::wikidata::WikidataClient;
use explore_item::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "explore-item", about = "Wikidata item aggregation service")]
struct Args {
    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long, env = "EXPLORE_BIND")]
    bind: Option<String>,

    /// Editorial database path, overrides the config file
    #[arg(long, env = "EXPLORE_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Explore Item Service (explore-item) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let mut app_config = config::load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        app_config.bind_address = bind;
    }
    if let Some(database) = args.database {
        app_config.database_path = database;
    }

    info!("Database path: {}", app_config.database_path.display());
    let pool = db::init_database(&app_config.database_path).await?;

    info!(
        "Query endpoint: {} (timeout {}s)",
        app_config.wikidata.endpoint, app_config.wikidata.timeout_seconds
    );
    let client = WikidataClient::new(&app_config.wikidata, &app_config.graph)?;

    let bind_address = app_config.bind_address.clone();
    let state = AppState::new(pool, Arc::new(client), app_config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("explore-item listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
