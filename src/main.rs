use clap::{Parser, Subcommand};
use expense_tracker::config::{AppConfig, DEFAULT_DATABASE_PATH, DEFAULT_OWNER_ID};
use expense_tracker::error::StoreError;
use expense_tracker::factory::provider::RandProvider;
use expense_tracker::{db, operations};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "expenses", about = "Manage the expenses database schema and fixtures")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "EXPENSES_DATABASE", default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Owner id assigned to generated categories
    #[arg(long, global = true, env = "EXPENSES_DEFAULT_OWNER", default_value_t = DEFAULT_OWNER_ID)]
    default_owner: i64,

    #[command(subcommand)]
    command: UserCommands,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Apply all pending migrations
    Migrate,
    /// Reverse the last batch of migrations
    Rollback,
    /// Show which migrations have run
    Status,
    /// Print the columns and foreign keys of a table
    Describe { table: String },
    /// Insert randomly generated categories
    Seed {
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Seed for reproducible fixtures
        #[arg(long)]
        rng_seed: Option<u64>,
    },
    /// Write all categories to a CSV file
    Export { path: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig {
        database_path: cli.database,
        default_owner: cli.default_owner,
    };

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig, command: UserCommands) -> Result<(), StoreError> {
    let conn = db::connection::establish_connection(&config.database_path)?;

    match command {
        UserCommands::Migrate => {
            let applied = operations::migrate::migrate_db(&conn)?;
            if applied.is_empty() {
                println!("Nothing to migrate.");
            }
            for name in applied {
                println!("Migrated: {}", name);
            }
        }
        UserCommands::Rollback => {
            let rolled_back = operations::migrate::rollback_db(&conn)?;
            if rolled_back.is_empty() {
                println!("Nothing to rollback.");
            }
            for name in rolled_back {
                println!("Rolled back: {}", name);
            }
        }
        UserCommands::Status => {
            let status = operations::migrate::migration_status_db(&conn)?;
            println!("{}", operations::migrate::format_status(&status));
        }
        UserCommands::Describe { table } => {
            println!("{}", operations::describe::describe_table_db(&conn, &table)?);
        }
        UserCommands::Seed { count, rng_seed } => {
            let provider = match rng_seed {
                Some(seed) => RandProvider::seeded(seed),
                None => RandProvider::from_entropy(),
            };
            let categories = operations::seed::seed_categories_db(&conn, config, provider, count)?;
            println!("Seeded {} categories for user {}.", categories.len(), config.default_owner);
        }
        UserCommands::Export { path } => {
            let count = operations::export::export_categories_csv(&conn, &path)?;
            println!("Exported {} categories to {}.", count, path.display());
        }
    }
    Ok(())
}
