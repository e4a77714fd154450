/// Connection provider abstraction for the seeder
///
/// The seeder never reaches for a global client. It is handed a
/// [`ConnectionProvider`] at construction and acquires exactly one
/// [`SeedConnection`] per run. Transaction control is explicit so that the
/// seeder decides when to begin, commit, roll back and release.
///
/// # Implementations
///
/// - [`crate::seed::postgres::PgConnectionProvider`]: pooled PostgreSQL connections
/// - [`crate::seed::mock::MockConnectionProvider`]: in-memory recorder for tests
///
/// # Contract
///
/// - `execute` takes `&self`: a whole batch of statements may be issued
///   concurrently on one connection. Implementations queue them.
/// - `execute` returns the number of rows affected; a skipped conflicting
///   insert affects zero rows.
/// - `release` consumes the connection and is called exactly once.

use crate::db::Statement;
use async_trait::async_trait;

/// Source of seeding connections
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Connection: SeedConnection;

    /// Acquires a connection
    async fn connect(&self) -> Result<Self::Connection, sqlx::Error>;
}

/// A single connection with explicit transaction control
#[async_trait]
pub trait SeedConnection: Send + Sync {
    /// Starts a transaction (`BEGIN`)
    async fn begin(&self) -> Result<(), sqlx::Error>;

    /// Executes a parameterized statement, returning rows affected
    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error>;

    /// Commits the open transaction (`COMMIT`)
    async fn commit(&self) -> Result<(), sqlx::Error>;

    /// Rolls back the open transaction (`ROLLBACK`)
    async fn rollback(&self) -> Result<(), sqlx::Error>;

    /// Hands the connection back to its provider
    async fn release(self) -> Result<(), sqlx::Error>;
}
