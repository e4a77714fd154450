/// Monthly revenue model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE revenue (
///     month VARCHAR(4) NOT NULL UNIQUE,
///     revenue INT NOT NULL
/// );
/// ```

use crate::db::Statement;
use crate::seed::InsertPolicy;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// Revenue for one month, keyed by a short month code such as `Jan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Revenue {
    #[validate(length(min = 1, max = 4))]
    pub month: String,

    #[validate(range(min = 0))]
    pub revenue: i32,
}

impl Revenue {
    /// Builds the insert for this row under the given conflict policy
    pub fn insert_statement(&self, policy: InsertPolicy) -> Statement {
        Statement::new(format!(
            "INSERT INTO revenue (month, revenue) VALUES ($1, $2) {}",
            policy.clause()
        ))
        .bind(self.month.as_str())
        .bind(self.revenue)
    }

    pub async fn find_by_month(pool: &PgPool, month: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue WHERE month = $1")
            .bind(month)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM revenue")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_length() {
        let revenue = Revenue {
            month: "Jan".to_string(),
            revenue: 2000,
        };
        assert!(revenue.validate().is_ok());

        let revenue = Revenue {
            month: "January".to_string(),
            revenue: 2000,
        };
        assert!(revenue.validate().is_err());
    }

    #[test]
    fn test_insert_statement_keys_on_month() {
        let revenue = Revenue {
            month: "Dec".to_string(),
            revenue: 4800,
        };
        let statement = revenue.insert_statement(InsertPolicy::skip_on_conflict("month"));

        assert!(statement.sql().ends_with("ON CONFLICT (month) DO NOTHING"));
        assert_eq!(statement.params()[0].as_text(), Some("Dec"));
    }
}
