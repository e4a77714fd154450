/// Seeding error types
///
/// A failed run is reported as "seeding failed at phase X with message Y"
/// and nothing finer: [`SeedError`] carries the [`SeedPhase`] and the
/// underlying [`SeedFailure`].

use crate::auth::password::PasswordError;
use crate::seed::EntityKind;
use std::fmt;

/// One logical step of the seeding transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPhase {
    /// Acquiring the connection
    Connect,
    /// `BEGIN`
    Begin,
    /// Extension and table creation
    Schema,
    /// One entity kind's insert batch
    Insert(EntityKind),
    /// `COMMIT`
    Commit,
}

impl fmt::Display for SeedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPhase::Connect => f.write_str("connect"),
            SeedPhase::Begin => f.write_str("begin"),
            SeedPhase::Schema => f.write_str("schema"),
            SeedPhase::Insert(kind) => write!(f, "{}", kind),
            SeedPhase::Commit => f.write_str("commit"),
        }
    }
}

/// Underlying cause of a failed phase
#[derive(Debug, thiserror::Error)]
pub enum SeedFailure {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// A seeding run that failed and was rolled back
#[derive(Debug, thiserror::Error)]
#[error("Seeding failed during {phase}: {source}")]
pub struct SeedError {
    phase: SeedPhase,
    #[source]
    source: SeedFailure,
}

impl SeedError {
    pub fn new(phase: SeedPhase, source: impl Into<SeedFailure>) -> Self {
        Self {
            phase,
            source: source.into(),
        }
    }

    /// Phase in which the run failed
    pub fn phase(&self) -> SeedPhase {
        self.phase
    }

    /// The underlying error text, without phase context
    pub fn message(&self) -> String {
        self.source.to_string()
    }

    pub fn failure(&self) -> &SeedFailure {
        &self.source
    }
}
