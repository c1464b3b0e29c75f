//! Scaffolding errors.

use std::path::PathBuf;

/// Result type for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while generating files.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// Seeder name missing or empty after cleaning
    #[error("seeder name cannot be empty")]
    EmptyName,

    /// Target directory missing
    #[error("directory cannot be empty")]
    EmptyDir,

    /// Refusing to overwrite an existing file
    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Every three digit sequence number is taken
    #[error("no sequence numbers left in {} (highest is {max})", .dir.display())]
    SequenceExhausted {
        /// Seeder directory
        dir: PathBuf,
        /// Highest allowed sequence number
        max: u32,
    },

    /// Unsupported database kind
    #[error("unknown database kind: {0} (expected postgresql, mysql or none)")]
    UnknownDatabase(String),

    /// Template rendered without its required parameters
    #[error("template {template} is missing required parameters: {}", .missing.join(", "))]
    MissingParameters {
        /// Template name
        template: String,
        /// Missing parameter names
        missing: Vec<String>,
    },

    /// I/O error on a specific path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
