/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL
/// );
/// ```
///
/// In the seed dataset `password` holds the plaintext; the seeder replaces
/// it with a bcrypt hash before the row is written. Rows read back from the
/// database always carry the hash.
///
/// # Example
///
/// ```no_run
/// use dashboard_shared::models::user::User;
/// use dashboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// if let Some(user) = User::find_by_email(&pool, "user@nextmail.com").await? {
///     println!("Found user: {}", user.id);
/// }
/// # Ok(())
/// # }
/// ```

use crate::db::Statement;
use crate::seed::InsertPolicy;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// User account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Email address, unique across all users
    #[validate(email)]
    pub email: String,

    /// Plaintext in seed data, bcrypt hash once stored
    #[validate(length(min = 1))]
    pub password: String,
}

impl User {
    /// Builds the insert for this row under the given conflict policy
    ///
    /// The caller is responsible for having replaced `password` with its hash.
    pub fn insert_statement(&self, policy: InsertPolicy) -> Statement {
        Statement::new(format!(
            "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) {}",
            policy.clause()
        ))
        .bind(self.id)
        .bind(self.name.as_str())
        .bind(self.email.as_str())
        .bind(self.password.as_str())
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts all users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqlParam;

    fn sample_user() -> User {
        User {
            id: Uuid::parse_str("410544b2-4001-4271-9855-fec4b6a6442a").unwrap(),
            name: "User".to_string(),
            email: "user@nextmail.com".to_string(),
            password: "123456".to_string(),
        }
    }

    #[test]
    fn test_insert_statement_skips_on_id_conflict() {
        let user = sample_user();
        let statement = user.insert_statement(InsertPolicy::skip_on_conflict("id"));

        assert_eq!(statement.insert_target(), Some("users"));
        assert!(statement.sql().ends_with("ON CONFLICT (id) DO NOTHING"));
        assert_eq!(statement.params()[0], SqlParam::Uuid(user.id));
        assert_eq!(statement.params()[3], SqlParam::Text("123456".to_string()));
    }

    #[test]
    fn test_validation() {
        assert!(sample_user().validate().is_ok());

        let mut user = sample_user();
        user.email = "not-an-email".to_string();
        assert!(user.validate().is_err());

        let mut user = sample_user();
        user.password = String::new();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_short_password_accepted() {
        let mut user = sample_user();
        user.password = "x".to_string();
        assert!(user.validate().is_ok());
    }
}
