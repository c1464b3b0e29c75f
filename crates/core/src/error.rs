//! Seeding errors.

use std::fmt;

/// Result type for seeding runs.
pub type Result<T> = std::result::Result<T, RunError>;

/// Errors from registry lookups.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No seeder registered under this name
    #[error("seeder not found: {0}")]
    NotFound(String),
}

/// A single seeder failure.
#[derive(Debug, thiserror::Error)]
#[error("seeder {seeder_name} failed: {cause}")]
pub struct SeederError {
    /// Name of the failed seeder
    pub seeder_name: String,

    /// Error returned by the seeder
    #[source]
    pub cause: anyhow::Error,
}

impl SeederError {
    /// Create a new seeder error.
    pub fn new(seeder_name: impl Into<String>, cause: anyhow::Error) -> Self {
        Self {
            seeder_name: seeder_name.into(),
            cause,
        }
    }

    /// Get the underlying cause.
    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }

    /// Consume and return the underlying cause.
    pub fn into_cause(self) -> anyhow::Error {
        self.cause
    }
}

/// Failures collected by a continue-on-error run, in execution order.
#[derive(Debug, Default)]
pub struct SeederErrors {
    /// Recorded failures
    pub errors: Vec<SeederError>,
}

impl SeederErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn add(&mut self, seeder_name: impl Into<String>, cause: anyhow::Error) {
        self.errors.push(SeederError::new(seeder_name, cause));
    }

    /// Whether any failure was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over failures in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, SeederError> {
        self.errors.iter()
    }

    /// Consume into the recorded failures.
    pub fn into_vec(self) -> Vec<SeederError> {
        self.errors
    }
}

impl fmt::Display for SeederErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no errors"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(
                f,
                "{} seeders failed: {} (and {} more)",
                self.errors.len(),
                first.seeder_name,
                rest.len()
            ),
        }
    }
}

impl std::error::Error for SeederErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl<'a> IntoIterator for &'a SeederErrors {
    type Item = &'a SeederError;
    type IntoIter = std::slice::Iter<'a, SeederError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Error returned by a seeding run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The requested seeder is not registered
    #[error(transparent)]
    NotFound(#[from] RegistryError),

    /// A single seeder failed
    #[error(transparent)]
    Seeder(#[from] SeederError),

    /// One or more seeders failed in a continue-on-error run
    #[error(transparent)]
    Many(#[from] SeederErrors),
}

impl RunError {
    /// Names of the failed seeders, in execution order.
    pub fn failed_seeders(&self) -> Vec<&str> {
        match self {
            RunError::NotFound(_) => Vec::new(),
            RunError::Seeder(e) => vec![e.seeder_name.as_str()],
            RunError::Many(errors) => errors.iter().map(|e| e.seeder_name.as_str()).collect(),
        }
    }
}
