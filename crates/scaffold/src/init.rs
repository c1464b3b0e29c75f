//! Seeder project initialization.

use crate::error::{Result, ScaffoldError};
use crate::template::params;
use crate::templates;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Database the generated project connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseKind {
    /// No driver; the handle is left for the user to configure
    #[default]
    None,
    /// PostgreSQL via the `postgres` crate
    Postgres,
    /// MySQL via the `mysql` crate
    Mysql,
}

impl DatabaseKind {
    /// Cargo dependency line for the driver.
    pub fn driver_dependency(self) -> &'static str {
        match self {
            DatabaseKind::None => "",
            DatabaseKind::Postgres => "postgres = \"0.19\"",
            DatabaseKind::Mysql => "mysql = \"25\"",
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(DatabaseKind::None),
            "postgresql" | "postgres" => Ok(DatabaseKind::Postgres),
            "mysql" => Ok(DatabaseKind::Mysql),
            other => Err(ScaffoldError::UnknownDatabase(other.to_string())),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatabaseKind::None => "none",
            DatabaseKind::Postgres => "postgresql",
            DatabaseKind::Mysql => "mysql",
        })
    }
}

/// Options for initializing a seeder project.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Project directory
    pub dir: PathBuf,

    /// Database the project connects to
    pub database: DatabaseKind,
}

impl InitOptions {
    /// Create options for a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            database: DatabaseKind::default(),
        }
    }

    /// Set the database kind.
    pub fn database(mut self, database: DatabaseKind) -> Self {
        self.database = database;
        self
    }
}

/// Files written by [`init_project`].
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// Created files, in write order
    pub files: Vec<PathBuf>,
}

/// Create a seeder project skeleton in `opts.dir`.
///
/// Fails without writing anything if `src/main.rs` already exists.
pub fn init_project(opts: &InitOptions) -> Result<InitReport> {
    if opts.dir.as_os_str().is_empty() {
        return Err(ScaffoldError::EmptyDir);
    }

    let main_path = opts.dir.join("src").join("main.rs");
    if main_path.exists() {
        return Err(ScaffoldError::AlreadyExists(main_path));
    }

    let seeders_dir = opts.dir.join("src").join("seeders");
    std::fs::create_dir_all(&seeders_dir).map_err(|e| ScaffoldError::io(&seeders_dir, e))?;

    let project = project_name(&opts.dir);
    let mut report = InitReport::default();

    write_file(
        &mut report,
        opts.dir.join("Cargo.toml"),
        templates::cargo_toml().render(&params([
            ("package_name", project.clone()),
            ("driver_dependency", opts.database.driver_dependency().to_string()),
        ]))?,
    )?;
    write_file(
        &mut report,
        main_path,
        templates::main_rs().render(&params([("project_name", project)]))?,
    )?;
    write_file(
        &mut report,
        opts.dir.join("src").join("config.rs"),
        templates::config_rs(opts.database).render(&Default::default())?,
    )?;
    write_file(
        &mut report,
        seeders_dir.join("mod.rs"),
        templates::seeders_mod().render(&Default::default())?,
    )?;
    write_file(
        &mut report,
        opts.dir.join("README.md"),
        templates::readme().render(&Default::default())?,
    )?;

    info!(
        "Initialized seeder project in {} ({} database)",
        opts.dir.display(),
        opts.database
    );
    Ok(report)
}

fn write_file(report: &mut InitReport, path: PathBuf, content: String) -> Result<()> {
    std::fs::write(&path, content).map_err(|e| ScaffoldError::io(&path, e))?;
    report.files.push(path);
    Ok(())
}

/// Cargo package name derived from the project directory.
fn project_name(dir: &Path) -> String {
    let base = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            std::fs::canonicalize(dir)
                .ok()
                .and_then(|abs| abs.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default();

    let name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let name = name.trim_matches('-');

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("seeders-{}", name).trim_end_matches('-').to_string()
    } else {
        name.to_string()
    }
}
