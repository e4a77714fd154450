/// Transactional database seeder
///
/// # Flow
///
/// ```text
/// Seeder::seed()
///   ├─> connect
///   ├─> BEGIN
///   ├─> CREATE EXTENSION / CREATE TABLE IF NOT EXISTS ×4
///   ├─> users      (hash + insert, fanned out)   ─┐
///   ├─> customers  (insert, fanned out)           │ strict barrier
///   ├─> invoices   (insert, fanned out)           │ between kinds
///   ├─> revenue    (insert, fanned out)          ─┘
///   ├─> COMMIT             on any error: ROLLBACK
///   └─> release            always, exactly once
/// ```
///
/// Every insert skips on key conflict, so running the seeder again leaves
/// the row set unchanged. Any failure aborts the whole run: nothing from the
/// attempt is committed, and the error names the phase that failed.

use crate::auth::password::{hash_password_blocking, SEED_PASSWORD_COST};
use crate::db::schema::schema_statements;
use crate::db::Statement;
use crate::models::{Invoice, User};
use crate::seed::{
    fan_out, ConnectionProvider, EntityKind, InsertPolicy, SeedConnection, SeedData, SeedError,
    SeedFailure, SeedPhase,
};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Tuning knobs that are not exposed outside the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// bcrypt work factor for user passwords
    pub password_cost: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            password_cost: SEED_PASSWORD_COST,
        }
    }
}

/// Rows actually inserted by a successful run, per kind
///
/// Keys that already existed are skipped and not counted, so a repeat run
/// reports zero everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: u64,
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

impl SeedReport {
    pub fn total(&self) -> u64 {
        self.users + self.customers + self.invoices + self.revenue
    }
}

/// Anything that can run one seeding attempt
///
/// Lets the HTTP layer hold a seeder without naming its connection provider.
#[async_trait]
pub trait SeedRunner: Send + Sync {
    async fn seed(&self) -> Result<SeedReport, SeedError>;
}

/// Seeds the dashboard schema and dataset in one transaction
pub struct Seeder<P> {
    provider: P,
    data: Arc<SeedData>,
    options: SeedOptions,
}

impl<P: ConnectionProvider> Seeder<P> {
    pub fn new(provider: P, data: SeedData) -> Self {
        Self {
            provider,
            data: Arc::new(data),
            options: SeedOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SeedOptions) -> Self {
        self.options = options;
        self
    }

    pub fn data(&self) -> &SeedData {
        &self.data
    }

    /// Runs one seeding attempt
    ///
    /// # Errors
    ///
    /// Returns a [`SeedError`] naming the failed phase. By then the
    /// transaction has been rolled back and the connection released.
    pub async fn seed(&self) -> Result<SeedReport, SeedError> {
        info!(records = self.data.len(), "Seeding database");

        let conn = self.provider.connect().await.map_err(|e| {
            error!(error = %e, "Error acquiring seeding connection");
            SeedError::new(SeedPhase::Connect, e)
        })?;

        let outcome = self.run(&conn).await;

        // Released exactly once; a release failure never replaces the outcome
        if let Err(e) = conn.release().await {
            warn!(error = %e, "Failed to release seeding connection");
        }

        if let Ok(report) = &outcome {
            info!(
                users = report.users,
                customers = report.customers,
                invoices = report.invoices,
                revenue = report.revenue,
                "Database seeded successfully"
            );
        }
        outcome
    }

    async fn run(&self, conn: &P::Connection) -> Result<SeedReport, SeedError> {
        match self.transaction(conn).await {
            Ok(report) => Ok(report),
            Err(err) => {
                if let Err(rollback_err) = conn.rollback().await {
                    error!(error = %rollback_err, "Rollback failed");
                }
                error!(
                    phase = %err.phase(),
                    error = %err.message(),
                    "Error during database seeding"
                );
                Err(err)
            }
        }
    }

    async fn transaction(&self, conn: &P::Connection) -> Result<SeedReport, SeedError> {
        conn.begin()
            .await
            .map_err(|e| SeedError::new(SeedPhase::Begin, e))?;

        self.create_schema(conn).await?;

        let mut report = SeedReport::default();
        for kind in EntityKind::ORDER {
            let inserted = self.seed_kind(conn, kind).await.map_err(|e| {
                error!(error = %e, "Error seeding {}", kind);
                SeedError::new(SeedPhase::Insert(kind), e)
            })?;

            match kind {
                EntityKind::Users => report.users = inserted,
                EntityKind::Customers => report.customers = inserted,
                EntityKind::Invoices => report.invoices = inserted,
                EntityKind::Revenue => report.revenue = inserted,
            }
        }

        conn.commit()
            .await
            .map_err(|e| SeedError::new(SeedPhase::Commit, e))?;

        Ok(report)
    }

    /// Statements run one at a time: the extension must exist before the
    /// tables that default to `uuid_generate_v4()`.
    async fn create_schema(&self, conn: &P::Connection) -> Result<(), SeedError> {
        for statement in schema_statements() {
            conn.execute(&statement).await.map_err(|e| {
                error!(error = %e, "Error creating schema");
                SeedError::new(SeedPhase::Schema, e)
            })?;
        }
        Ok(())
    }

    /// Inserts one kind's batch, returning rows actually inserted
    async fn seed_kind(&self, conn: &P::Connection, kind: EntityKind) -> Result<u64, SeedFailure> {
        let policy = kind.insert_policy();

        let statements: Vec<Statement> = match kind {
            EntityKind::Users => {
                let cost = self.options.password_cost;
                let inserts: Vec<_> = self
                    .data
                    .users
                    .iter()
                    .map(|user| insert_user(conn, user, policy, cost))
                    .collect();
                return Ok(fan_out(inserts).await?.into_iter().sum());
            }
            EntityKind::Customers => self
                .data
                .customers
                .iter()
                .map(|customer| customer.insert_statement(policy))
                .collect(),
            EntityKind::Invoices => self
                .data
                .invoices
                .iter()
                .zip(Invoice::seed_ids(&self.data.invoices))
                .map(|(invoice, id)| invoice.insert_statement(id, policy))
                .collect(),
            EntityKind::Revenue => self
                .data
                .revenue
                .iter()
                .map(|revenue| revenue.insert_statement(policy))
                .collect(),
        };

        let inserts: Vec<_> = statements
            .iter()
            .map(|statement| execute(conn, statement))
            .collect();
        Ok(fan_out(inserts).await?.into_iter().sum())
    }
}

async fn execute<C: SeedConnection>(conn: &C, statement: &Statement) -> Result<u64, SeedFailure> {
    Ok(conn.execute(statement).await?)
}

async fn insert_user<C: SeedConnection>(
    conn: &C,
    user: &User,
    policy: InsertPolicy,
    cost: u32,
) -> Result<u64, SeedFailure> {
    let password = hash_password_blocking(user.password.clone(), cost).await?;
    let stored = User {
        password,
        ..user.clone()
    };

    execute(conn, &stored.insert_statement(policy)).await
}

#[async_trait]
impl<P: ConnectionProvider> SeedRunner for Seeder<P> {
    async fn seed(&self) -> Result<SeedReport, SeedError> {
        Seeder::seed(self).await
    }
}
