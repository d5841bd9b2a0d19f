//! sqlplan CLI
//!
//! Command-line tool for planning and applying schema migrations.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlplan_migrate::prelude::*;

/// Plans and applies schema migrations between table descriptions.
#[derive(Parser)]
#[command(name = "sqlplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the plan without touching the database.
    Plan {
        /// JSON file with the current tables.
        #[arg(short, long)]
        current: PathBuf,

        /// JSON file with the previous tables (empty if not specified).
        #[arg(short, long)]
        previous: Option<PathBuf>,
    },

    /// Apply the plan to the database.
    Apply {
        /// JSON file with the current tables.
        #[arg(short, long)]
        current: PathBuf,

        /// JSON file with the previous tables (empty if not specified).
        #[arg(short, long)]
        previous: Option<PathBuf>,

        /// Show SQL without executing (dry run).
        #[arg(long)]
        dry_run: bool,

        /// Rewrite `?` placeholders as `$1`, `$2`, ...
        #[arg(long)]
        numbered_placeholders: bool,
    },
}

fn load_pair(current: &Path, previous: Option<&Path>) -> anyhow::Result<(Tables, Tables)> {
    let current = load_tables(current)?;
    let previous = previous.map(load_tables).transpose()?.unwrap_or_default();
    Ok((current, previous))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = SqliteDialect::new();

    match cli.command {
        Commands::Plan { current, previous } => {
            let (current, previous) = load_pair(&current, previous.as_deref())?;
            let plan = plan_migration(&current, &previous, &dialect)?;
            for expr in plan.iter().filter(|expr| !expr.is_empty()) {
                println!("{};", expr.query());
            }
        }

        Commands::Apply {
            current,
            previous,
            dry_run,
            numbered_placeholders,
        } => {
            let (current, previous) = load_pair(&current, previous.as_deref())?;

            if dry_run {
                info!("Dry run mode - SQL will be printed but not executed.");
            }

            let pool = connect(&cli.database, 5).await?;
            let config = ExecutorConfig::new()
                .dry_run(dry_run)
                .numbered_placeholders(numbered_placeholders);
            let executor = PlanExecutor::new(pool, config);

            let report = executor.migrate(&current, &previous, &dialect).await?;
            if dry_run {
                for statement in &report.statements {
                    println!("{statement};");
                }
            }
            info!(
                "Done: {} statement(s) executed, {} skipped.",
                report.executed, report.skipped
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn database_defaults_to_local_file() {
        let command = Cli::command();
        let database = command
            .get_arguments()
            .find(|arg| arg.get_id() == "database")
            .unwrap();
        let defaults: Vec<_> = database
            .get_default_values()
            .iter()
            .map(|value| value.to_string_lossy())
            .collect();
        assert_eq!(defaults, ["sqlite:db.sqlite3"]);
    }

    #[test]
    fn parses_apply_flags() {
        let cli = Cli::try_parse_from([
            "sqlplan",
            "--database",
            "sqlite:app.db",
            "apply",
            "--current",
            "schema.json",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.database, "sqlite:app.db");
        match cli.command {
            Commands::Apply {
                current,
                previous,
                dry_run,
                numbered_placeholders,
            } => {
                assert_eq!(current, PathBuf::from("schema.json"));
                assert!(previous.is_none());
                assert!(dry_run);
                assert!(!numbered_placeholders);
            }
            Commands::Plan { .. } => panic!("expected apply"),
        }
    }
}
