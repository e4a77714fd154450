/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use dashboard_api::{app::{build_router, AppState}, config::Config};
/// use dashboard_shared::seed::{postgres::PgConnectionProvider, SeedData, Seeder};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let seeder = Seeder::new(PgConnectionProvider::new(pool.clone()), SeedData::placeholder()?);
///
/// let app = build_router(AppState::new(pool, config, seeder));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{http::Uri, routing::get, Router};
use dashboard_shared::seed::SeedRunner;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Runs one seeding attempt per `GET /seed`
    pub seeder: Arc<dyn SeedRunner>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config, seeder: impl SeedRunner + 'static) -> Self {
        Self::with_seeder(db, config, Arc::new(seeder))
    }

    pub fn with_seeder(db: PgPool, config: Config, seeder: Arc<dyn SeedRunner>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            seeder,
        }
    }
}

/// Builds the Axum router
///
/// ```text
/// /
/// ├── GET /health    # Health check
/// └── GET /seed      # Seed the database
/// ```
///
/// Any other path answers 404 with a JSON error body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/seed", get(routes::seed::seed))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
