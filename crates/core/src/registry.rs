//! Seeder registry.

use crate::error::RegistryError;
use crate::seeder::{Seeder, SeederRef};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Thread-safe registry of seeders.
///
/// Seeders are kept in registration order. Names are not required to be
/// unique: duplicates are all retained and all run.
pub struct SeederRegistry<H> {
    seeders: RwLock<Vec<SeederRef<H>>>,
}

impl<H> SeederRegistry<H> {
    /// Create a new registry.
    pub fn new() -> Self {
        Self {
            seeders: RwLock::new(Vec::new()),
        }
    }

    // Every mutation is a single push or replace, so a poisoned lock still
    // guards a consistent vector.
    fn read(&self) -> RwLockReadGuard<'_, Vec<SeederRef<H>>> {
        self.seeders.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<SeederRef<H>>> {
        self.seeders.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a seeder.
    pub fn register(&self, seeder: SeederRef<H>) {
        debug!("Registering seeder: {}", seeder.name());
        self.write().push(seeder);
    }

    /// Register a seeder by value.
    pub fn register_seeder<S>(&self, seeder: S)
    where
        S: Seeder<H> + 'static,
    {
        self.register(Arc::new(seeder));
    }

    /// Snapshot of all seeders sorted by name.
    ///
    /// Seeders sharing a name keep their registration order.
    pub fn all_sorted(&self) -> Vec<SeederRef<H>> {
        let mut seeders = self.read().clone();
        seeders.sort_by(|a, b| a.name().cmp(b.name()));
        seeders
    }

    /// Sorted seeder names.
    pub fn names(&self) -> Vec<String> {
        self.all_sorted()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Find the first registered seeder with this name.
    pub fn find_by_name(&self, name: &str) -> Result<SeederRef<H>, RegistryError> {
        self.read()
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Remove all seeders.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of registered seeders.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Whether no seeder is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl<H> Default for SeederRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for SeederRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeederRegistry")
            .field("seeders", &self.names())
            .finish()
    }
}
