//! Seeder scaffolding.
//!
//! Generates seeder source files and seeder project skeletons for hosts
//! built on `seedkit-core`.

#![warn(missing_docs)]

pub mod create;
pub mod error;
pub mod init;
pub mod naming;
pub mod template;
pub mod templates;

pub use create::{create_seeder, CreateOptions, CreatedSeeder};
pub use error::{Result, ScaffoldError};
pub use init::{init_project, DatabaseKind, InitOptions, InitReport};
pub use template::{Template, TemplateParameter, TemplateValidation};
