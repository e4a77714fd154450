/// Mock connection provider for testing
///
/// Records every call made by the seeder and keeps a tiny in-memory table
/// store so the seeder's transactional behaviour can be checked without a
/// database:
///
/// - Inserts are keyed on their first parameter (the conflict key for every
///   seeded table); an insert whose key already exists affects zero rows.
/// - Writes made inside a transaction stay pending until `COMMIT`;
///   `ROLLBACK` or releasing mid-transaction discards them.
/// - [`FailPoint`]s make chosen calls fail with a protocol error.
///
/// The provider is a cheap handle over shared state: clone it, hand one
/// clone to the seeder and keep the other for assertions.
///
/// # Example
///
/// ```
/// use dashboard_shared::seed::mock::{FailPoint, MockConnectionProvider};
/// use dashboard_shared::seed::{SeedData, SeedOptions, Seeder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider =
///     MockConnectionProvider::new().fail_at(FailPoint::statement("INSERT INTO invoices"));
/// let seeder = Seeder::new(provider.clone(), SeedData::placeholder()?)
///     .with_options(SeedOptions { password_cost: 4 });
///
/// assert!(seeder.seed().await.is_err());
/// assert_eq!(provider.release_count(), 1);
/// assert!(provider.rows("users").is_empty());
/// # Ok(())
/// # }
/// ```

use crate::db::{SqlParam, Statement};
use crate::seed::{ConnectionProvider, SeedConnection};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// A call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Connect,
    Begin,
    /// SQL text of a statement, recorded when it is issued
    Execute(String),
    /// SQL text of a statement, recorded when it finishes (either way)
    Completed(String),
    Commit,
    Rollback,
    Release,
}

/// A call the mock should fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailPoint {
    Connect,
    Begin,
    /// Every statement whose SQL contains this text
    Statement(String),
    Commit,
    Rollback,
    Release,
}

impl FailPoint {
    pub fn statement(sql_fragment: impl Into<String>) -> Self {
        FailPoint::Statement(sql_fragment.into())
    }
}

type RowKey = (String, SqlParam);

#[derive(Debug, Default)]
struct Tables {
    committed: HashMap<RowKey, Vec<SqlParam>>,
    pending: HashMap<RowKey, Vec<SqlParam>>,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Mutex<Vec<MockCall>>,
    tables: Mutex<Tables>,
    fail_points: Mutex<Vec<FailPoint>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockState {
    fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
    }

    fn check(&self, matches: impl Fn(&FailPoint) -> bool, what: &str) -> Result<(), sqlx::Error> {
        if lock(&self.fail_points).iter().any(matches) {
            Err(sqlx::Error::Protocol(format!("simulated failure: {}", what)))
        } else {
            Ok(())
        }
    }
}

/// Recording connection provider
#[derive(Debug, Clone, Default)]
pub struct MockConnectionProvider {
    state: Arc<MockState>,
}

impl MockConnectionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a failure to inject
    pub fn fail_at(self, point: FailPoint) -> Self {
        lock(&self.state.fail_points).push(point);
        self
    }

    /// Removes all injected failures, keeping stored rows
    pub fn clear_failures(&self) {
        lock(&self.state.fail_points).clear();
    }

    /// Every call observed so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.state.calls).clone()
    }

    /// SQL of every executed statement, in order
    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Execute(sql) => Some(sql),
                _ => None,
            })
            .collect()
    }

    fn count(&self, wanted: &MockCall) -> usize {
        lock(&self.state.calls)
            .iter()
            .filter(|call| *call == wanted)
            .count()
    }

    pub fn connect_count(&self) -> usize {
        self.count(&MockCall::Connect)
    }

    pub fn commit_count(&self) -> usize {
        self.count(&MockCall::Commit)
    }

    pub fn rollback_count(&self) -> usize {
        self.count(&MockCall::Rollback)
    }

    pub fn release_count(&self) -> usize {
        self.count(&MockCall::Release)
    }

    /// Committed rows of a table, as the parameters they were inserted with
    pub fn rows(&self, table: &str) -> Vec<Vec<SqlParam>> {
        lock(&self.state.tables)
            .committed
            .iter()
            .filter(|((row_table, _), _)| row_table == table)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[async_trait]
impl ConnectionProvider for MockConnectionProvider {
    type Connection = MockConnection;

    async fn connect(&self) -> Result<MockConnection, sqlx::Error> {
        self.state.record(MockCall::Connect);
        self.state
            .check(|point| *point == FailPoint::Connect, "connect")?;

        Ok(MockConnection {
            state: self.state.clone(),
            in_transaction: AtomicBool::new(false),
        })
    }
}

/// Connection handed out by [`MockConnectionProvider`]
#[derive(Debug)]
pub struct MockConnection {
    state: Arc<MockState>,
    in_transaction: AtomicBool,
}

impl MockConnection {
    fn apply(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let sql = statement.sql();
        let fails = |point: &FailPoint| match point {
            FailPoint::Statement(fragment) => sql.contains(fragment.as_str()),
            _ => false,
        };
        self.state.check(fails, sql.trim())?;

        let (Some(table), Some(key)) = (statement.insert_target(), statement.params().first())
        else {
            return Ok(0);
        };

        let row_key = (table.to_string(), key.clone());
        let mut tables = lock(&self.state.tables);
        if tables.committed.contains_key(&row_key) || tables.pending.contains_key(&row_key) {
            return Ok(0);
        }

        let params = statement.params().to_vec();
        if self.in_transaction.load(Ordering::SeqCst) {
            tables.pending.insert(row_key, params);
        } else {
            tables.committed.insert(row_key, params);
        }
        Ok(1)
    }
}

#[async_trait]
impl SeedConnection for MockConnection {
    async fn begin(&self) -> Result<(), sqlx::Error> {
        self.state.record(MockCall::Begin);
        self.state.check(|point| *point == FailPoint::Begin, "BEGIN")?;
        self.in_transaction.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let sql = statement.sql().to_string();
        self.state.record(MockCall::Execute(sql.clone()));

        // Let the rest of a concurrently issued batch get in line
        tokio::task::yield_now().await;

        let result = self.apply(statement);
        self.state.record(MockCall::Completed(sql));
        result
    }

    async fn commit(&self) -> Result<(), sqlx::Error> {
        self.state.record(MockCall::Commit);
        self.state.check(|point| *point == FailPoint::Commit, "COMMIT")?;

        let mut tables = lock(&self.state.tables);
        let pending = std::mem::take(&mut tables.pending);
        tables.committed.extend(pending);
        self.in_transaction.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self) -> Result<(), sqlx::Error> {
        self.state.record(MockCall::Rollback);
        self.state
            .check(|point| *point == FailPoint::Rollback, "ROLLBACK")?;

        lock(&self.state.tables).pending.clear();
        self.in_transaction.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn release(self) -> Result<(), sqlx::Error> {
        self.state.record(MockCall::Release);

        // Dropping a connection mid-transaction loses its uncommitted writes
        if self.in_transaction.load(Ordering::SeqCst) {
            lock(&self.state.tables).pending.clear();
        }

        self.state
            .check(|point| *point == FailPoint::Release, "release")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(month: &str, revenue: i32) -> Statement {
        Statement::new("INSERT INTO revenue (month, revenue) VALUES ($1, $2)")
            .bind(month)
            .bind(revenue)
    }

    #[tokio::test]
    async fn test_commit_makes_rows_visible() {
        let provider = MockConnectionProvider::new();
        let conn = provider.connect().await.unwrap();

        conn.begin().await.unwrap();
        assert_eq!(conn.execute(&insert("Jan", 2000)).await.unwrap(), 1);
        assert!(provider.rows("revenue").is_empty());

        conn.commit().await.unwrap();
        conn.release().await.unwrap();

        assert_eq!(provider.rows("revenue").len(), 1);
        assert_eq!(provider.release_count(), 1);
    }

    #[tokio::test]
    async fn test_conflicting_insert_affects_no_rows() {
        let provider = MockConnectionProvider::new();
        let conn = provider.connect().await.unwrap();

        assert_eq!(conn.execute(&insert("Jan", 2000)).await.unwrap(), 1);
        assert_eq!(conn.execute(&insert("Jan", 9999)).await.unwrap(), 0);

        let rows = provider.rows("revenue");
        assert_eq!(rows, vec![vec![SqlParam::from("Jan"), SqlParam::Int(2000)]]);
    }

    #[tokio::test]
    async fn test_rollback_discards_pending_rows() {
        let provider = MockConnectionProvider::new();
        let conn = provider.connect().await.unwrap();

        conn.begin().await.unwrap();
        conn.execute(&insert("Feb", 1800)).await.unwrap();
        conn.rollback().await.unwrap();
        conn.release().await.unwrap();

        assert!(provider.rows("revenue").is_empty());
        assert_eq!(provider.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_records_issue_and_completion() {
        let provider = MockConnectionProvider::new();
        let conn = provider.connect().await.unwrap();

        let apr = insert("Apr", 2500);
        let may = insert("May", 2300);
        let (first, second) = tokio::join!(conn.execute(&apr), conn.execute(&may));
        assert_eq!(first.unwrap() + second.unwrap(), 2);

        let calls = provider.calls();
        assert!(matches!(calls[1], MockCall::Execute(_)));
        assert!(matches!(calls[2], MockCall::Execute(_)));
        assert!(matches!(calls[3], MockCall::Completed(_)));
        assert!(matches!(calls[4], MockCall::Completed(_)));
        assert_eq!(provider.executed().len(), 2);
    }

    #[tokio::test]
    async fn test_statement_fail_point() {
        let provider =
            MockConnectionProvider::new().fail_at(FailPoint::statement("INSERT INTO revenue"));
        let conn = provider.connect().await.unwrap();

        let err = conn.execute(&insert("Mar", 2200)).await.unwrap_err();
        assert!(err.to_string().contains("simulated failure"));

        provider.clear_failures();
        assert_eq!(conn.execute(&insert("Mar", 2200)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_connect_fail_point() {
        let provider = MockConnectionProvider::new().fail_at(FailPoint::Connect);
        assert!(provider.connect().await.is_err());
        assert_eq!(provider.connect_count(), 1);
    }
}
