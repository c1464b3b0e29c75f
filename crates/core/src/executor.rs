//! Seeder execution.

use crate::error::{Result, SeederError, SeederErrors};
use crate::registry::SeederRegistry;
use crate::seeder::Deps;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

type NameCallback<'a> = Box<dyn FnMut(&str) + 'a>;
type ErrorCallback<'a> = Box<dyn FnMut(&str, &anyhow::Error) + 'a>;

/// Options for a batch run.
///
/// Callbacks are invoked synchronously, in execution order.
#[derive(Default)]
pub struct RunOptions<'a> {
    /// Keep running remaining seeders after a failure
    pub continue_on_error: bool,

    on_start: Option<NameCallback<'a>>,
    on_complete: Option<NameCallback<'a>>,
    on_error: Option<ErrorCallback<'a>>,
}

impl<'a> RunOptions<'a> {
    /// Fail-fast options with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the failure policy.
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Called before each seeder runs.
    pub fn on_start(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called after each seeder succeeds.
    pub fn on_complete(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Called when a seeder fails, under either policy.
    pub fn on_error(mut self, f: impl FnMut(&str, &anyhow::Error) + 'a) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for RunOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("continue_on_error", &self.continue_on_error)
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Runs registered seeders against a database handle.
///
/// Each batch run works on a sorted snapshot of the registry taken when the
/// run starts; seeders registered mid-run wait for the next run.
pub struct SeedExecutor<H> {
    registry: Arc<SeederRegistry<H>>,
}

impl<H> SeedExecutor<H> {
    /// Create a new executor over a registry.
    pub fn new(registry: Arc<SeederRegistry<H>>) -> Self {
        Self { registry }
    }

    /// Get the registry.
    pub fn registry(&self) -> &SeederRegistry<H> {
        &self.registry
    }

    /// Sorted names of the seeders a batch run would execute.
    pub fn list(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Run all seeders, stopping at the first failure.
    pub fn run_all(&self, db: &H, deps: &Deps) -> Result<()> {
        self.run_all_with_options(db, deps, RunOptions::default())
    }

    /// Run all seeders with custom options.
    pub fn run_all_with_options(&self, db: &H, deps: &Deps, mut opts: RunOptions<'_>) -> Result<()> {
        let seeders = self.registry.all_sorted();
        let mut errors = SeederErrors::new();

        info!(
            "Running {} seeders (continue_on_error: {})",
            seeders.len(),
            opts.continue_on_error
        );

        for seeder in &seeders {
            let name = seeder.name();

            if let Some(on_start) = opts.on_start.as_mut() {
                on_start(name);
            }
            debug!("Seeding: {}", name);

            if let Err(cause) = seeder.seed(db, deps) {
                warn!("Seeder {} failed: {:#}", name, cause);

                if let Some(on_error) = opts.on_error.as_mut() {
                    on_error(name, &cause);
                }

                if !opts.continue_on_error {
                    return Err(SeederError::new(name, cause).into());
                }

                errors.add(name, cause);
                continue;
            }

            debug!("Seeded: {}", name);
            if let Some(on_complete) = opts.on_complete.as_mut() {
                on_complete(name);
            }
        }

        if errors.has_errors() {
            warn!("{} of {} seeders failed", errors.len(), seeders.len());
            return Err(errors.into());
        }

        info!("All {} seeders completed", seeders.len());
        Ok(())
    }

    /// Run a single seeder by name.
    ///
    /// Batch callbacks do not apply here.
    pub fn run_specific(&self, name: &str, db: &H, deps: &Deps) -> Result<()> {
        let seeder = self.registry.find_by_name(name)?;

        info!("Running seeder: {}", name);
        seeder
            .seed(db, deps)
            .map_err(|cause| SeederError::new(seeder.name(), cause))?;

        Ok(())
    }
}

impl<H> Clone for SeedExecutor<H> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}
