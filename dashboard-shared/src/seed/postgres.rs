/// PostgreSQL connection provider
///
/// Each seeding run checks one connection out of the application's
/// [`PgPool`]. Transaction control is issued as plain `BEGIN` / `COMMIT` /
/// `ROLLBACK` statements on that connection, and concurrently issued
/// statements queue on an async mutex, so the whole batch shares the one
/// open transaction.
///
/// A connection whose rollback failed may still be inside a transaction;
/// on release it is closed instead of going back to the pool.
///
/// # Example
///
/// ```no_run
/// use dashboard_shared::seed::{postgres::PgConnectionProvider, SeedData, Seeder};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let seeder = Seeder::new(PgConnectionProvider::new(pool), SeedData::placeholder()?);
/// let report = seeder.seed().await?;
/// println!("Inserted {} rows", report.total());
/// # Ok(())
/// # }
/// ```

use crate::db::{SqlParam, Statement};
use crate::seed::{ConnectionProvider, SeedConnection};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgPool, Postgres};
use sqlx::query::Query;
use sqlx::Connection;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Hands out pooled PostgreSQL connections
#[derive(Debug, Clone)]
pub struct PgConnectionProvider {
    pool: PgPool,
}

impl PgConnectionProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionProvider for PgConnectionProvider {
    type Connection = PgSeedConnection;

    async fn connect(&self) -> Result<PgSeedConnection, sqlx::Error> {
        let conn = self.pool.acquire().await?;
        debug!("Acquired seeding connection");

        Ok(PgSeedConnection {
            conn: Mutex::new(conn),
            poisoned: AtomicBool::new(false),
        })
    }
}

/// One pooled connection used for a whole seeding transaction
pub struct PgSeedConnection {
    conn: Mutex<PoolConnection<Postgres>>,
    poisoned: AtomicBool,
}

impl PgSeedConnection {
    async fn run(&self, sql: &'static str) -> Result<(), sqlx::Error> {
        let mut conn = self.conn.lock().await;
        sqlx::query(sql).execute(&mut **conn).await?;
        Ok(())
    }
}

fn bind_params(statement: &Statement) -> Query<'_, Postgres, PgArguments> {
    statement
        .params()
        .iter()
        .fold(sqlx::query(statement.sql()), |query, param| match param {
            SqlParam::Uuid(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.as_str()),
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::Date(value) => query.bind(*value),
        })
}

#[async_trait]
impl SeedConnection for PgSeedConnection {
    async fn begin(&self) -> Result<(), sqlx::Error> {
        self.run("BEGIN").await
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let mut conn = self.conn.lock().await;
        let result = bind_params(statement).execute(&mut **conn).await?;
        Ok(result.rows_affected())
    }

    async fn commit(&self) -> Result<(), sqlx::Error> {
        self.run("COMMIT").await
    }

    async fn rollback(&self) -> Result<(), sqlx::Error> {
        let result = self.run("ROLLBACK").await;
        if result.is_err() {
            self.poisoned.store(true, Ordering::SeqCst);
        }
        result
    }

    async fn release(self) -> Result<(), sqlx::Error> {
        let conn = self.conn.into_inner();

        if self.poisoned.load(Ordering::SeqCst) {
            warn!("Closing seeding connection after failed rollback");
            return conn.detach().close().await;
        }

        drop(conn);
        debug!("Released seeding connection");
        Ok(())
    }
}
