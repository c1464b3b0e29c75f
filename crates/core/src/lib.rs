//! seedkit core.
//!
//! Registers named, idempotent seeders and runs them against a database
//! handle in lexical name order, either stopping at the first failure or
//! collecting every failure of the run.
//!
//! ```text
//! register → all_sorted snapshot → seed each → Ok | SeederError | SeederErrors
//! ```

#![warn(missing_docs)]

mod error;
mod executor;
mod registry;
mod seeder;

pub use error::{RegistryError, Result, RunError, SeederError, SeederErrors};
pub use executor::{RunOptions, SeedExecutor};
pub use registry::SeederRegistry;
pub use seeder::{Deps, Seeder, SeederRef};
