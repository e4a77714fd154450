/// Customer model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE customers (
///     id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     image_url VARCHAR(255) NOT NULL
/// );
/// ```

use crate::db::Statement;
use crate::seed::InsertPolicy;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Customer row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    /// Path or URL of the customer's avatar
    #[validate(length(min = 1, max = 255))]
    pub image_url: String,
}

impl Customer {
    /// Builds the insert for this row under the given conflict policy
    pub fn insert_statement(&self, policy: InsertPolicy) -> Statement {
        Statement::new(format!(
            "INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4) {}",
            policy.clause()
        ))
        .bind(self.id)
        .bind(self.name.as_str())
        .bind(self.email.as_str())
        .bind(self.image_url.as_str())
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, image_url
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(customer)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_statement() {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "Evil Rabbit".to_string(),
            email: "evil@rabbit.com".to_string(),
            image_url: "/customers/evil-rabbit.png".to_string(),
        };

        let statement = customer.insert_statement(InsertPolicy::skip_on_conflict("id"));
        assert_eq!(statement.insert_target(), Some("customers"));
        assert_eq!(statement.params().len(), 4);
        assert!(customer.validate().is_ok());
    }
}
