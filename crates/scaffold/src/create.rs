//! Seeder file generation.

use crate::error::{Result, ScaffoldError};
use crate::naming::{self, FILE_PREFIX};
use crate::template::params;
use crate::templates::{self, MODULES_MARKER, REGISTER_MARKER};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for creating a seeder file.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Seeder name (e.g. "users", "permissions")
    pub name: String,

    /// Directory the seeder file is written to
    pub dir: PathBuf,

    /// Use sequential numbering (001, 002) instead of a timestamp
    pub sequential: bool,

    /// Time used for the timestamp prefix (defaults to the local clock)
    pub now: Option<NaiveDateTime>,
}

impl CreateOptions {
    /// Create options for a seeder in a directory.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Use sequential numbering.
    pub fn sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    /// Fix the timestamp used for the prefix.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

/// A generated seeder file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSeeder {
    /// Path of the new file
    pub path: PathBuf,

    /// Name returned by the seeder (`<prefix>_<name>`)
    pub seeder_name: String,

    /// Generated struct name
    pub struct_name: String,

    /// Module name of the file
    pub module: String,

    /// Whether the seeder was added to `mod.rs` in the same directory
    pub registered: bool,
}

/// Create a new seeder file.
pub fn create_seeder(opts: &CreateOptions) -> Result<CreatedSeeder> {
    if opts.name.trim().is_empty() {
        return Err(ScaffoldError::EmptyName);
    }
    if opts.dir.as_os_str().is_empty() {
        return Err(ScaffoldError::EmptyDir);
    }

    let name = naming::clean_seeder_name(&opts.name);
    if name.trim_matches('_').is_empty() {
        return Err(ScaffoldError::EmptyName);
    }

    std::fs::create_dir_all(&opts.dir).map_err(|e| ScaffoldError::io(&opts.dir, e))?;

    let prefix = if opts.sequential {
        naming::sequence_prefix(naming::next_sequential_number(&opts.dir)?)
    } else {
        let now = opts
            .now
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        naming::timestamp_prefix(now)
    };

    let seeder_name = format!("{}_{}", prefix, name);
    let module = format!("{}{}", FILE_PREFIX, seeder_name);
    let path = opts.dir.join(format!("{}.rs", module));
    if path.exists() {
        return Err(ScaffoldError::AlreadyExists(path));
    }

    let struct_name = naming::struct_name(&name);
    let content = templates::seeder().render(&params([
        ("struct_name", struct_name.clone()),
        ("seeder_name", seeder_name.clone()),
        ("description", name.replace('_', " ")),
    ]))?;

    std::fs::write(&path, content).map_err(|e| ScaffoldError::io(&path, e))?;
    info!("Created seeder file: {}", path.display());

    let registered = register_in_mod(&opts.dir, &module, &struct_name)?;

    Ok(CreatedSeeder {
        path,
        seeder_name,
        struct_name,
        module,
        registered,
    })
}

/// Add module and registration lines to `dir/mod.rs`.
///
/// Returns `false` when there is no `mod.rs` or it lacks the markers.
fn register_in_mod(dir: &Path, module: &str, struct_name: &str) -> Result<bool> {
    let mod_path = dir.join("mod.rs");
    if !mod_path.is_file() {
        debug!("No mod.rs in {}, skipping registration", dir.display());
        return Ok(false);
    }

    let source = std::fs::read_to_string(&mod_path).map_err(|e| ScaffoldError::io(&mod_path, e))?;
    let module_line = format!("mod {};", module);
    let register_line = format!("registry.register_seeder({}::{});", module, struct_name);

    let Some(updated) = insert_before_marker(&source, MODULES_MARKER, &module_line)
        .and_then(|s| insert_before_marker(&s, REGISTER_MARKER, &register_line))
    else {
        debug!("{} has no seedkit markers, skipping registration", mod_path.display());
        return Ok(false);
    };

    std::fs::write(&mod_path, updated).map_err(|e| ScaffoldError::io(&mod_path, e))?;
    info!("Registered {} in {}", struct_name, mod_path.display());
    Ok(true)
}

/// Insert `line` before the marker line, with the marker's indentation.
///
/// Returns `None` if the marker is absent. An identical existing line is
/// not duplicated. Existing line endings are kept as they are, and the
/// inserted line uses CRLF when the source does.
pub(crate) fn insert_before_marker(source: &str, marker: &str, line: &str) -> Option<String> {
    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
    let mut output = String::with_capacity(source.len() + line.len() + 8);
    let mut found = false;
    let already_present = source.lines().any(|l| l.trim() == line);

    for l in source.split_inclusive('\n') {
        if !found && l.trim() == marker {
            found = true;
            if !already_present {
                let indent = &l[..l.len() - l.trim_start().len()];
                output.push_str(indent);
                output.push_str(line);
                output.push_str(newline);
            }
        }
        output.push_str(l);
    }

    found.then_some(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_create_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let opts = CreateOptions::new("users", dir.path()).sequential(true);

        let created = create_seeder(&opts).unwrap();

        assert_eq!(created.seeder_name, "001_users");
        assert_eq!(created.struct_name, "UsersSeeder");
        assert_eq!(created.module, "seed_001_users");
        assert_eq!(created.path, dir.path().join("seed_001_users.rs"));
        assert!(!created.registered);

        let content = std::fs::read_to_string(&created.path).unwrap();
        assert!(content.contains("pub struct UsersSeeder;"));
        assert!(content.contains("impl Seeder<Db> for UsersSeeder"));
        assert!(content.contains("\"001_users\""));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn test_create_sequential_increments() {
        let dir = tempfile::tempdir().unwrap();

        create_seeder(&CreateOptions::new("users", dir.path()).sequential(true)).unwrap();
        let second =
            create_seeder(&CreateOptions::new("user_roles", dir.path()).sequential(true)).unwrap();

        assert_eq!(second.seeder_name, "002_user_roles");
        assert_eq!(second.struct_name, "UserRolesSeeder");
    }

    #[test]
    fn test_create_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let opts = CreateOptions::new("products", dir.path()).at(fixed_time());

        let created = create_seeder(&opts).unwrap();

        assert_eq!(created.seeder_name, "20240115093000_products");
        assert!(dir.path().join("seed_20240115093000_products.rs").is_file());
    }

    #[test]
    fn test_create_cleans_name() {
        let dir = tempfile::tempdir().unwrap();
        let opts = CreateOptions::new("seed_007_audit_log.rs", dir.path()).sequential(true);

        let created = create_seeder(&opts).unwrap();

        assert_eq!(created.seeder_name, "001_audit_log");
        assert_eq!(created.struct_name, "AuditLogSeeder");
    }

    #[test]
    fn test_create_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("seeders");

        create_seeder(&CreateOptions::new("users", &nested).sequential(true)).unwrap();

        assert!(nested.join("seed_001_users.rs").is_file());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = CreateOptions::new("products", dir.path()).at(fixed_time());

        create_seeder(&opts).unwrap();
        let err = create_seeder(&opts).unwrap_err();

        assert!(matches!(err, ScaffoldError::AlreadyExists(ref p) if p.ends_with("seed_20240115093000_products.rs")));
    }

    #[test]
    fn test_create_validates_input() {
        let dir = tempfile::tempdir().unwrap();

        let err = create_seeder(&CreateOptions::new("", dir.path())).unwrap_err();
        assert!(matches!(err, ScaffoldError::EmptyName));

        let err = create_seeder(&CreateOptions::new("001_", dir.path())).unwrap_err();
        assert!(matches!(err, ScaffoldError::EmptyName));

        let err = create_seeder(&CreateOptions::new("users", "")).unwrap_err();
        assert!(matches!(err, ScaffoldError::EmptyDir));
    }

    #[test]
    fn test_create_registers_in_mod() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mod.rs"),
            templates::seeders_mod().render(&Default::default()).unwrap(),
        )
        .unwrap();

        let first = create_seeder(&CreateOptions::new("users", dir.path()).sequential(true)).unwrap();
        let second = create_seeder(&CreateOptions::new("roles", dir.path()).sequential(true)).unwrap();
        assert!(first.registered && second.registered);

        let mod_rs = std::fs::read_to_string(dir.path().join("mod.rs")).unwrap();
        let users_mod = mod_rs.find("mod seed_001_users;").unwrap();
        let roles_mod = mod_rs.find("mod seed_002_roles;").unwrap();
        let modules_marker = mod_rs.find(MODULES_MARKER).unwrap();
        assert!(users_mod < roles_mod && roles_mod < modules_marker);

        assert!(mod_rs.contains("    registry.register_seeder(seed_001_users::UsersSeeder);\n"));
        assert!(mod_rs.contains("    registry.register_seeder(seed_002_roles::RolesSeeder);\n"));
    }

    #[test]
    fn test_mod_without_markers_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mod.rs"), "pub mod hand_written;\n").unwrap();

        let created = create_seeder(&CreateOptions::new("users", dir.path()).sequential(true)).unwrap();

        assert!(!created.registered);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("mod.rs")).unwrap(),
            "pub mod hand_written;\n"
        );
    }

    #[test]
    fn test_insert_before_marker() {
        let source = "fn f() {\n    // seedkit:register\n}\n";

        let once = insert_before_marker(source, REGISTER_MARKER, "a();").unwrap();
        assert_eq!(once, "fn f() {\n    a();\n    // seedkit:register\n}\n");

        let twice = insert_before_marker(&once, REGISTER_MARKER, "a();").unwrap();
        assert_eq!(twice, once);

        assert!(insert_before_marker("fn f() {}\n", REGISTER_MARKER, "a();").is_none());
    }

    #[test]
    fn test_insert_before_marker_keeps_crlf() {
        let source = "fn f() {\r\n    // seedkit:register\r\n}\r\n";

        let updated = insert_before_marker(source, REGISTER_MARKER, "a();").unwrap();

        assert_eq!(updated, "fn f() {\r\n    a();\r\n    // seedkit:register\r\n}\r\n");
    }

    #[test]
    fn test_insert_before_marker_keeps_missing_final_newline() {
        let source = "mod a;\n// seedkit:modules";

        let updated = insert_before_marker(source, MODULES_MARKER, "mod b;").unwrap();

        assert_eq!(updated, "mod a;\nmod b;\n// seedkit:modules");
    }
}
