//! seedkit CLI - seeder scaffolding tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use seedkit_scaffold::{create_seeder, init_project, CreateOptions, DatabaseKind, InitOptions};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seedkit")]
#[command(about = "Database seeder scaffolding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a seeder project in a directory
    Init {
        /// Project directory
        dir: PathBuf,
        /// Database to connect to (postgresql, mysql, none)
        #[arg(long, default_value = "none")]
        database: DatabaseKind,
    },
    /// Create a new seeder file
    Create {
        /// Seeder name (e.g. users)
        name: String,
        /// Directory for seeder files
        #[arg(long, env = "SEEDKIT_DIR", default_value = "./src/seeders")]
        dir: PathBuf,
        /// Use sequential numbering (001, 002) instead of a timestamp
        #[arg(long)]
        seq: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, database } => {
            debug!("Initializing {} with {} database", dir.display(), database);
            let report = init_project(&InitOptions::new(&dir).database(database))?;

            println!("✓ Seeder project initialized successfully!");
            println!();
            println!("Files created:");
            for file in &report.files {
                println!("  - {}", file.display());
            }
            println!();
            println!("Next steps:");
            println!(
                "  1. Edit {} to configure your database",
                dir.join("src").join("config.rs").display()
            );
            println!(
                "  2. Create seeders: seedkit create users --dir {} --seq",
                dir.join("src").join("seeders").display()
            );
            println!(
                "  3. Run seeders: cd {} && cargo run -- --all",
                dir.display()
            );
        }
        Commands::Create { name, dir, seq } => {
            println!("Creating seeder: {}", name);
            println!("Directory: {}", dir.display());
            println!("Mode: {}", if seq { "Sequential" } else { "Timestamp" });
            println!();

            let created = create_seeder(&CreateOptions::new(name, dir).sequential(seq))?;

            println!("✓ Created seeder file: {}", created.path.display());
            println!("  Seeder name: {}", created.seeder_name);
            if created.registered {
                println!("  Registered {} in mod.rs", created.struct_name);
            } else {
                println!(
                    "  Register it with: registry.register_seeder({}::{});",
                    created.module, created.struct_name
                );
            }
        }
    }

    Ok(())
}
