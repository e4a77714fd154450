/// Entity kinds and their insert policy
///
/// Seeding never overwrites: every row is written "insert or skip on key
/// conflict", keyed per entity kind. The policy is a value rather than a
/// string baked into each statement so it can be asserted on directly.

use std::fmt;

/// Insert-or-skip on a key conflict
///
/// Renders as `ON CONFLICT (<key>) DO NOTHING`: an existing row with the
/// same key is left untouched and the insert affects zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPolicy {
    conflict_key: &'static str,
}

impl InsertPolicy {
    pub const fn skip_on_conflict(conflict_key: &'static str) -> Self {
        Self { conflict_key }
    }

    /// Column whose uniqueness triggers the skip
    pub fn conflict_key(&self) -> &'static str {
        self.conflict_key
    }

    /// SQL conflict clause appended to the insert
    pub fn clause(&self) -> String {
        format!("ON CONFLICT ({}) DO NOTHING", self.conflict_key)
    }
}

/// The four seeded entity kinds, in seeding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Users,
    Customers,
    Invoices,
    Revenue,
}

impl EntityKind {
    /// Seeding order. Invoices follow customers even though no foreign key
    /// enforces it.
    pub const ORDER: [EntityKind; 4] = [
        EntityKind::Users,
        EntityKind::Customers,
        EntityKind::Invoices,
        EntityKind::Revenue,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Customers => "customers",
            EntityKind::Invoices => "invoices",
            EntityKind::Revenue => "revenue",
        }
    }

    pub fn insert_policy(&self) -> InsertPolicy {
        match self {
            EntityKind::Revenue => InsertPolicy::skip_on_conflict("month"),
            EntityKind::Users | EntityKind::Customers | EntityKind::Invoices => {
                InsertPolicy::skip_on_conflict("id")
            }
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}
