/// Owned, parameterized SQL statements
///
/// A [`Statement`] pairs SQL text using `$n` placeholders with the values to
/// bind. Statements are plain data, so they can be built up front, handed to
/// any [`crate::seed::SeedConnection`] and inspected in tests without a
/// database.
///
/// # Example
///
/// ```
/// use dashboard_shared::db::{SqlParam, Statement};
///
/// let statement = Statement::new("INSERT INTO revenue (month, revenue) VALUES ($1, $2)")
///     .bind("Jan")
///     .bind(2000);
///
/// assert_eq!(statement.params(), &[SqlParam::Text("Jan".into()), SqlParam::Int(2000)]);
/// ```

use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

/// A value bound to a statement placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlParam {
    Uuid(Uuid),
    Text(String),
    Int(i32),
    Date(NaiveDate),
}

impl SqlParam {
    /// Returns the text value, if this is a text parameter
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlParam::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlParam::Uuid(value) => write!(f, "{}", value),
            SqlParam::Text(value) => write!(f, "{}", value),
            SqlParam::Int(value) => write!(f, "{}", value),
            SqlParam::Date(value) => write!(f, "{}", value),
        }
    }
}

impl From<Uuid> for SqlParam {
    fn from(value: Uuid) -> Self {
        SqlParam::Uuid(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(value)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(value: NaiveDate) -> Self {
        SqlParam::Date(value)
    }
}

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    /// Creates a statement with no parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends the value for the next `$n` placeholder
    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Table named by an `INSERT INTO <table>` statement
    pub fn insert_target(&self) -> Option<&str> {
        let rest = self.sql.trim_start().strip_prefix("INSERT INTO ")?;
        rest.split_whitespace().next()
    }
}
