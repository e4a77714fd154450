//! # Dashboard Shared Library
//!
//! This crate contains the data layer and seeding logic used by the
//! dashboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Row types for users, customers, invoices and revenue
//! - `auth`: Password hashing
//! - `db`: Connection pool, schema definition and parameterized statements
//! - `seed`: Seed dataset, insert policy and the transactional [`seed::Seeder`]

pub mod auth;
pub mod db;
pub mod models;
pub mod seed;

/// Current version of the dashboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
