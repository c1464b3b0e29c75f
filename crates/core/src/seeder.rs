//! Seeder abstraction.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named unit of seeding work run against a database handle `H`.
///
/// Implementations should be idempotent: hosts may run the same seeder
/// against an already seeded database.
pub trait Seeder<H>: Send + Sync {
    /// Get the seeder name. Execution order is the lexical order of names.
    fn name(&self) -> &str;

    /// Seed the database.
    fn seed(&self, db: &H, deps: &Deps) -> Result<(), anyhow::Error>;
}

/// Shared handle to a registered seeder.
pub type SeederRef<H> = Arc<dyn Seeder<H>>;

/// Collaborators handed to every seeder unchanged (secondary clients,
/// policy enforcers, ...).
#[derive(Clone, Default)]
pub struct Deps {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Deps {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency.
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a dependency, replacing any previous value under `key`.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Arc::new(value));
    }

    /// Get a dependency by key.
    ///
    /// Returns `None` if the key is absent or holds a value of another type.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// List keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of dependencies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Deps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Deps").field("keys", &keys).finish()
    }
}
