/// Seed dataset
///
/// The dataset is plain records for each entity kind. The reference
/// dashboard data ships inside the crate; deployments can point at their own
/// JSON file of the same shape:
///
/// ```json
/// {
///   "users":     [{ "id": "...", "name": "...", "email": "...", "password": "..." }],
///   "customers": [{ "id": "...", "name": "...", "email": "...", "image_url": "..." }],
///   "invoices":  [{ "customer_id": "...", "amount": 15795, "status": "pending", "date": "2022-12-06" }],
///   "revenue":   [{ "month": "Jan", "revenue": 2000 }]
/// }
/// ```
///
/// Every loaded dataset is validated before use, so a malformed record or a
/// duplicate key is reported at load time rather than halfway through a
/// seeding transaction.

use crate::models::{Customer, Invoice, Revenue, User};
use crate::seed::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

const PLACEHOLDER_DATA: &str = include_str!("placeholder_data.json");

/// Error loading or validating a seed dataset
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read seed data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {kind} record at index {index}: {errors}")]
    Invalid {
        kind: EntityKind,
        index: usize,
        errors: ValidationErrors,
    },

    #[error("Duplicate {kind} key in seed data: {key}")]
    Duplicate { kind: EntityKind, key: String },
}

/// Records to seed, per entity kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub revenue: Vec<Revenue>,
}

impl SeedData {
    /// The bundled reference dataset
    pub fn placeholder() -> Result<Self, DataError> {
        Self::from_json(PLACEHOLDER_DATA)
    }

    /// Parses and validates a JSON dataset
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: SeedData = serde_json::from_str(json)?;
        data.validate()?;

        debug!(
            users = data.users.len(),
            customers = data.customers.len(),
            invoices = data.invoices.len(),
            revenue = data.revenue.len(),
            "Loaded seed data"
        );
        Ok(data)
    }

    /// Reads, parses and validates a JSON dataset file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks every record and rejects duplicate keys
    ///
    /// Users are unique by both id and email; the email clash would
    /// otherwise surface as a constraint violation mid-transaction.
    pub fn validate(&self) -> Result<(), DataError> {
        check_records(EntityKind::Users, &self.users)?;
        check_records(EntityKind::Customers, &self.customers)?;
        check_records(EntityKind::Invoices, &self.invoices)?;
        check_records(EntityKind::Revenue, &self.revenue)?;

        check_unique(EntityKind::Users, self.users.iter().map(|u| u.id.to_string()))?;
        check_unique(EntityKind::Users, self.users.iter().map(|u| u.email.clone()))?;
        check_unique(EntityKind::Customers, self.customers.iter().map(|c| c.id.to_string()))?;
        check_unique(
            EntityKind::Invoices,
            Invoice::seed_ids(&self.invoices).iter().map(Uuid::to_string),
        )?;
        check_unique(EntityKind::Revenue, self.revenue.iter().map(|r| r.month.clone()))?;

        Ok(())
    }

    /// Number of records across all kinds
    pub fn len(&self) -> usize {
        self.users.len() + self.customers.len() + self.invoices.len() + self.revenue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_records<T: Validate>(kind: EntityKind, records: &[T]) -> Result<(), DataError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|errors| DataError::Invalid { kind, index, errors })?;
    }
    Ok(())
}

fn check_unique(kind: EntityKind, keys: impl Iterator<Item = String>) -> Result<(), DataError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(DataError::Duplicate { kind, key });
        }
    }
    Ok(())
}
