/// Database layer for the dashboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `statement`: Owned, parameterized SQL statements
/// - `schema`: Table definitions created by the seeder
///
/// # Example
///
/// ```no_run
/// use dashboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;
pub mod statement;

pub use statement::{SqlParam, Statement};
