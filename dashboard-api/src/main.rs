//! # Dashboard API Server
//!
//! Serves `GET /seed`, which creates the dashboard schema and loads the
//! seed dataset in one transaction, plus `GET /health`.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/dashboard cargo run -p dashboard-api
//! ```

use dashboard_api::app::{build_router, AppState};
use dashboard_api::config::Config;
use dashboard_shared::db::pool::{self, DatabaseConfig};
use dashboard_shared::seed::postgres::PgConnectionProvider;
use dashboard_shared::seed::{SeedData, Seeder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dashboard_api=debug,dashboard_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Dashboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    let data = match &config.seed.data_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading seed data");
            SeedData::from_path(path)?
        }
        None => SeedData::placeholder()?,
    };
    let seeder = Seeder::new(PgConnectionProvider::new(db.clone()), data);

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(db.clone(), config, seeder));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
