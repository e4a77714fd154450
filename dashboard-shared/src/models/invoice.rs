/// Invoice model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE invoices (
///     id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
///     customer_id UUID NOT NULL,
///     amount INT NOT NULL,
///     status VARCHAR(255) NOT NULL,
///     date DATE NOT NULL
/// );
/// ```
///
/// `customer_id` is not a foreign key. Amounts are in cents.
///
/// Seed invoices usually carry no id. [`Invoice::seed_ids`] derives a stable
/// name-based UUID from each invoice's contents and its occurrence among
/// identical invoices, so that re-seeding hits the primary-key conflict
/// instead of inserting a duplicate row.

use crate::db::Statement;
use crate::seed::InsertPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Namespace for deterministic seed invoice ids
pub const INVOICE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2d8e_94b3_4c57_a0e2_3b71_d5f8_c946);

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("Unknown invoice status: {}", other)),
        }
    }
}

/// Invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Invoice {
    /// Explicit id; derived by [`Invoice::seed_id`] when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub customer_id: Uuid,

    /// Amount in the smallest currency unit
    #[validate(range(min = 0))]
    pub amount: i32,

    pub status: InvoiceStatus,

    pub date: NaiveDate,
}

impl Invoice {
    fn content_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.customer_id, self.amount, self.status, self.date
        )
    }

    /// Id under which this invoice is seeded
    ///
    /// `occurrence` counts the earlier invoices in the same dataset with
    /// identical content, keeping each of them a separate row.
    pub fn seed_id(&self, occurrence: usize) -> Uuid {
        self.id.unwrap_or_else(|| {
            let name = format!("{}:{}", self.content_key(), occurrence);
            Uuid::new_v5(&INVOICE_ID_NAMESPACE, name.as_bytes())
        })
    }

    /// Seed ids for a list of invoices, in list order
    pub fn seed_ids(invoices: &[Invoice]) -> Vec<Uuid> {
        let mut seen: HashMap<String, usize> = HashMap::new();

        invoices
            .iter()
            .map(|invoice| {
                let occurrence = seen.entry(invoice.content_key()).or_insert(0);
                let id = invoice.seed_id(*occurrence);
                *occurrence += 1;
                id
            })
            .collect()
    }

    /// Builds the insert for this row, stored under `id`
    pub fn insert_statement(&self, id: Uuid, policy: InsertPolicy) -> Statement {
        Statement::new(format!(
            "INSERT INTO invoices (id, customer_id, amount, status, date) VALUES ($1, $2, $3, $4, $5) {}",
            policy.clause()
        ))
        .bind(id)
        .bind(self.customer_id)
        .bind(self.amount)
        .bind(self.status.as_str())
        .bind(self.date)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let row: Option<(Uuid, Uuid, i32, String, NaiveDate)> = sqlx::query_as(
            r#"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(|(id, customer_id, amount, status, date)| -> Result<Self, sqlx::Error> {
            let status = status
                .parse()
                .map_err(|e: String| sqlx::Error::Decode(e.into()))?;
            Ok(Invoice {
                id: Some(id),
                customer_id,
                amount,
                status,
                date,
            })
        })
        .transpose()
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqlParam;

    fn sample_invoice() -> Invoice {
        Invoice {
            id: None,
            customer_id: Uuid::parse_str("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa").unwrap(),
            amount: 15795,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2022, 12, 6).unwrap(),
        }
    }

    #[test]
    fn test_seed_id_is_stable() {
        let invoice = sample_invoice();
        assert_eq!(invoice.seed_id(0), sample_invoice().seed_id(0));
        assert_eq!(invoice.seed_id(0).get_version_num(), 5);
    }

    #[test]
    fn test_seed_id_differs_by_content() {
        let mut other = sample_invoice();
        other.amount = 666;
        assert_ne!(sample_invoice().seed_id(0), other.seed_id(0));
    }

    #[test]
    fn test_explicit_id_wins() {
        let id = Uuid::new_v4();
        let invoice = Invoice {
            id: Some(id),
            ..sample_invoice()
        };
        assert_eq!(invoice.seed_id(0), id);
        assert_eq!(invoice.seed_id(3), id);
    }

    #[test]
    fn test_identical_invoices_get_distinct_ids() {
        let mut other = sample_invoice();
        other.amount = 666;
        let invoices = vec![sample_invoice(), other.clone(), sample_invoice()];

        let ids = Invoice::seed_ids(&invoices);

        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], sample_invoice().seed_id(0));
        assert_eq!(ids[1], other.seed_id(0));
        assert_eq!(ids[2], sample_invoice().seed_id(1));
        assert_ne!(ids[0], ids[2]);

        // Same list, same ids
        assert_eq!(Invoice::seed_ids(&invoices), ids);
    }

    #[test]
    fn test_insert_statement() {
        let invoice = sample_invoice();
        let id = invoice.seed_id(0);
        let statement = invoice.insert_statement(id, InsertPolicy::skip_on_conflict("id"));

        assert_eq!(statement.insert_target(), Some("invoices"));
        assert_eq!(statement.params()[0], SqlParam::Uuid(id));
        assert_eq!(statement.params()[3], SqlParam::Text("pending".to_string()));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("overdue".parse::<InvoiceStatus>().is_err());

        let status: InvoiceStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut invoice = sample_invoice();
        invoice.amount = -1;
        assert!(invoice.validate().is_err());
    }
}
