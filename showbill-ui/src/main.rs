//! showbill-ui - Venue/artist/show booking directory service
//!
//! Serves the JSON API for the booking directory over a local SQLite
//! database. Each request is handled independently; the database is the
//! only shared state.

use anyhow::Result;
use clap::Parser;
use showbill_common::config;
use showbill_common::db::init_database;
use showbill_ui::{build_router, AppState};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "showbill-ui", version, about = "Showbill booking directory service")]
struct Cli {
    /// Root folder holding the database (overrides env and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5730)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber first so startup is observable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Showbill (showbill-ui) v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", cli.port)).await?;
    info!("showbill-ui listening on http://127.0.0.1:{}", cli.port);
    info!("Health check: http://127.0.0.1:{}/health", cli.port);

    axum::serve(listener, app).await?;

    Ok(())
}
