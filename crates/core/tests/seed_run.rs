//! End-to-end seeding against an in-memory store.

use seedkit_core::{Deps, RunError, RunOptions, SeedExecutor, Seeder, SeederRegistry};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::thread;

/// Minimal table store standing in for a database connection.
#[derive(Default)]
struct Store {
    tables: Mutex<BTreeMap<String, Vec<String>>>,
}

impl Store {
    fn insert_unique(&self, table: &str, row: &str) -> anyhow::Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        if !rows.iter().any(|r| r == row) {
            rows.push(row.to_string());
        }
        Ok(())
    }

    fn rows(&self, table: &str) -> Vec<String> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

struct UsersSeeder;

impl Seeder<Store> for UsersSeeder {
    fn name(&self) -> &str {
        "001_users"
    }

    fn seed(&self, db: &Store, _deps: &Deps) -> anyhow::Result<()> {
        for email in ["john@example.com", "jane@example.com", "bob@example.com"] {
            db.insert_unique("users", email)?;
        }
        Ok(())
    }
}

struct RolesSeeder;

impl Seeder<Store> for RolesSeeder {
    fn name(&self) -> &str {
        "002_roles"
    }

    fn seed(&self, db: &Store, deps: &Deps) -> anyhow::Result<()> {
        let roles = deps
            .get::<Vec<&'static str>>("roles")
            .ok_or_else(|| anyhow::anyhow!("roles dependency not provided"))?;
        for role in roles {
            db.insert_unique("roles", role)?;
        }
        Ok(())
    }
}

struct AuditSeeder;

impl Seeder<Store> for AuditSeeder {
    fn name(&self) -> &str {
        "20240101120000_audit"
    }

    fn seed(&self, db: &Store, _deps: &Deps) -> anyhow::Result<()> {
        if db.rows("users").is_empty() {
            anyhow::bail!("users must be seeded first");
        }
        db.insert_unique("audit", "seeded")
    }
}

fn registry() -> Arc<SeederRegistry<Store>> {
    let registry = Arc::new(SeederRegistry::new());
    registry.register_seeder(AuditSeeder);
    registry.register_seeder(RolesSeeder);
    registry.register_seeder(UsersSeeder);
    registry
}

#[test]
fn test_full_run_is_ordered_and_idempotent() {
    let executor = SeedExecutor::new(registry());
    let store = Store::default();
    let deps = Deps::new().with("roles", vec!["admin", "editor"]);

    executor.run_all(&store, &deps).unwrap();
    executor.run_all(&store, &deps).unwrap();

    assert_eq!(store.rows("users").len(), 3);
    assert_eq!(store.rows("roles"), vec!["admin", "editor"]);
    assert_eq!(store.rows("audit"), vec!["seeded"]);
}

#[test]
fn test_missing_dependency_reports_every_failure() {
    let registry = registry();
    registry.register_seeder(RolesSeeder);
    let executor = SeedExecutor::new(registry);
    let store = Store::default();
    let progress = Mutex::new(Vec::new());

    let err = executor
        .run_all_with_options(
            &store,
            &Deps::new(),
            RunOptions::new()
                .continue_on_error(true)
                .on_start(|name| progress.lock().unwrap().push(format!("start {}", name)))
                .on_complete(|name| progress.lock().unwrap().push(format!("done {}", name)))
                .on_error(|name, _| progress.lock().unwrap().push(format!("fail {}", name))),
        )
        .unwrap_err();

    assert!(matches!(err, RunError::Many(_)));
    assert_eq!(err.to_string(), "2 seeders failed: 002_roles (and 1 more)");
    assert_eq!(
        progress.into_inner().unwrap(),
        vec![
            "start 001_users",
            "done 001_users",
            "start 002_roles",
            "fail 002_roles",
            "start 002_roles",
            "fail 002_roles",
            "start 20240101120000_audit",
            "done 20240101120000_audit",
        ]
    );
}

#[test]
fn test_registration_from_many_threads() {
    struct Numbered(String);

    impl Seeder<Store> for Numbered {
        fn name(&self) -> &str {
            &self.0
        }

        fn seed(&self, db: &Store, _deps: &Deps) -> anyhow::Result<()> {
            db.insert_unique("order", &self.0)
        }
    }

    let registry = Arc::new(SeederRegistry::new());
    let handles: Vec<_> = (0..100)
        .rev()
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.register_seeder(Numbered(format!("{:03}_unit", i))))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.count(), 100);

    let store = Store::default();
    SeedExecutor::new(Arc::clone(&registry))
        .run_all(&store, &Deps::new())
        .unwrap();

    let order = store.rows("order");
    assert_eq!(order.len(), 100);
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    registry.clear();
    assert_eq!(registry.count(), 0);
}

#[test]
fn test_run_specific_skips_callbacks_and_others() {
    let executor = SeedExecutor::new(registry());
    let store = Store::default();

    executor
        .run_specific("001_users", &store, &Deps::new())
        .unwrap();

    assert_eq!(store.rows("users").len(), 3);
    assert!(store.rows("roles").is_empty());

    let err = executor
        .run_specific("999_missing", &store, &Deps::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "seeder not found: 999_missing");
}
