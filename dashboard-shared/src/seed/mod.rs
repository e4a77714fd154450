/// Database seeding
///
/// Populates a fresh dashboard database with the demo dataset in a single
/// all-or-nothing transaction.
///
/// # Modules
///
/// - [`seeder`]: The [`Seeder`] and its report/options types
/// - [`data`]: The seed dataset and its loader
/// - [`policy`]: Entity kinds and the insert-or-skip policy
/// - [`fanout`]: Concurrent batch barrier
/// - [`connection`]: Connection provider traits
/// - [`postgres`]: PostgreSQL connection provider
/// - [`mock`]: Recording connection provider for tests
/// - [`error`]: Phase-tagged seeding errors
///
/// # Example
///
/// ```no_run
/// use dashboard_shared::seed::{postgres::PgConnectionProvider, SeedData, Seeder};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let seeder = Seeder::new(PgConnectionProvider::new(pool), SeedData::placeholder()?);
///
/// // Safe to run repeatedly: existing keys are skipped
/// seeder.seed().await?;
/// let report = seeder.seed().await?;
/// assert_eq!(report.total(), 0);
/// # Ok(())
/// # }
/// ```

pub mod connection;
pub mod data;
pub mod error;
pub mod fanout;
pub mod mock;
pub mod policy;
pub mod postgres;
pub mod seeder;

pub use connection::{ConnectionProvider, SeedConnection};
pub use data::{DataError, SeedData};
pub use error::{SeedError, SeedFailure, SeedPhase};
pub use fanout::fan_out;
pub use policy::{EntityKind, InsertPolicy};
pub use seeder::{SeedOptions, SeedReport, SeedRunner, Seeder};
