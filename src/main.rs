//! Command-line interface for norm-mysql
//!
//! # Usage Examples
//!
//! ## Definitions
//! ```bash
//! norm-mysql define --schema tables.yaml --table foo
//! norm-mysql defined --table foo
//! norm-mysql undefine --table foo
//! ```
//!
//! ## Data
//! ```bash
//! norm-mysql insert --table foo --rows '[{"foo": "pre1"}, {"bar": "pre4"}]'
//! norm-mysql find --table foo --criteria '{"foo": "pre1", "!or": [{"bar": "pre4"}, {"bar2": "pre4"}]}'
//! norm-mysql count --table foo --criteria '{"name!like": "oo"}'
//! norm-mysql update --table foo --criteria '{"id": 2}' --set '{"foo": "bar"}'
//! norm-mysql delete --table foo --criteria '{"id!gt": 4}'
//! ```
//!
//! ## Benchmark
//! ```bash
//! norm-mysql bench --rows 10000 --buffer-size 1000
//! ```
//!
//! Connection flags fall back to `MYSQL_CONNECTION_STRING` or the `DB_*`
//! environment variables.

use anyhow::Context;
use clap::{Parser, Subcommand};
use norm_core::wire::{criteria_from_str, row_from_json, rows_from_json};
use norm_core::{Query, Schema};
use norm_mysql::bench::{self, BenchConfig};
use norm_mysql::{ConnectionOpts, QueryArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "norm-mysql")]
#[command(about = "Run norm operations against MySQL")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a table from its YAML declaration
    Define {
        #[command(flatten)]
        conn: ConnectionOpts,

        /// YAML file with table declarations
        #[arg(long, value_name = "PATH")]
        schema: PathBuf,

        /// Declared table to create
        #[arg(long)]
        table: String,
    },

    /// Drop a table
    Undefine {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[arg(long)]
        table: String,
    },

    /// Print whether a table exists
    Defined {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[arg(long)]
        table: String,
    },

    /// Print matching rows as JSON
    Find {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the number of matching rows
    Count {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[command(flatten)]
        query: QueryArgs,

        /// Apply --limit/--skip to the counted rows
        #[arg(long)]
        with_pagination: bool,
    },

    /// Delete matching rows
    Delete {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[arg(long)]
        table: String,

        /// Criteria in the wire encoding; '{}' deletes every row
        #[arg(long, default_value = "{}")]
        criteria: String,
    },

    /// Update matching rows
    Update {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[arg(long)]
        table: String,

        /// Criteria in the wire encoding; '{}' updates every row
        #[arg(long, default_value = "{}")]
        criteria: String,

        /// Values to set, as a JSON object
        #[arg(long)]
        set: String,
    },

    /// Insert one row or a JSON array of rows
    Insert {
        #[command(flatten)]
        conn: ConnectionOpts,

        #[arg(long)]
        table: String,

        /// A JSON object or array of objects
        #[arg(long)]
        rows: String,

        /// YAML declarations; the table's declared fields become the
        /// inserted columns
        #[arg(long, value_name = "PATH")]
        schema: Option<PathBuf>,
    },

    /// Insert benchmark: batched multi-row inserts in one transaction
    Bench {
        #[command(flatten)]
        conn: ConnectionOpts,

        /// Scratch table (recreated)
        #[arg(long, default_value = "foo")]
        table: String,

        /// Rows to insert
        #[arg(long, default_value_t = bench::DEFAULT_ROWS)]
        rows: u64,

        /// Rows per INSERT statement
        #[arg(long, default_value_t = bench::DEFAULT_BUFFER_SIZE)]
        buffer_size: usize,

        /// Keep the scratch table afterwards
        #[arg(long)]
        keep_table: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_json(text: &str, what: &str) -> anyhow::Result<serde_json::Value> {
    serde_json::from_str(text).with_context(|| format!("Invalid JSON for {what}"))
}

async fn run() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("norm_mysql=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Define {
            conn,
            schema,
            table,
        } => {
            let schema = Schema::from_file(&schema)
                .with_context(|| format!("Failed to load schema from {}", schema.display()))?;
            let decl = schema.table(&table)?;
            let mut adapter = conn.adapter()?;
            adapter
                .define(decl)
                .await
                .with_context(|| format!("Failed to define table {table}"))?;
            adapter.end().await?;
        }
        Commands::Undefine { conn, table } => {
            let mut adapter = conn.adapter()?;
            adapter
                .undefine(&table)
                .await
                .with_context(|| format!("Failed to undefine table {table}"))?;
            adapter.end().await?;
        }
        Commands::Defined { conn, table } => {
            let mut adapter = conn.adapter()?;
            println!("{}", adapter.defined(&table).await);
            adapter.end().await?;
        }
        Commands::Find { conn, query } => {
            let query = query.to_query().context("Invalid query")?;
            let mut adapter = conn.adapter()?;
            let rows = adapter.load(&query).await?;
            adapter.end().await?;
            print_json(&rows)?;
        }
        Commands::Count {
            conn,
            query,
            with_pagination,
        } => {
            let query = query.to_query().context("Invalid query")?;
            let mut adapter = conn.adapter()?;
            let count = adapter.count(&query, with_pagination).await?;
            adapter.end().await?;
            println!("{count}");
        }
        Commands::Delete {
            conn,
            table,
            criteria,
        } => {
            let query = Query::new(table).criteria(criteria_from_str(&criteria)?);
            let mut adapter = conn.adapter()?;
            let affected = adapter.delete(&query).await?;
            adapter.end().await?;
            print_json(&serde_json::json!({ "affected": affected }))?;
        }
        Commands::Update {
            conn,
            table,
            criteria,
            set,
        } => {
            let query = Query::new(table).criteria(criteria_from_str(&criteria)?);
            let sets = row_from_json(&parse_json(&set, "--set")?)?;
            let mut adapter = conn.adapter()?;
            let affected = adapter.update(&query, &sets).await?;
            adapter.end().await?;
            print_json(&serde_json::json!({ "affected": affected }))?;
        }
        Commands::Insert {
            conn,
            table,
            rows,
            schema,
        } => {
            let rows = rows_from_json(&parse_json(&rows, "--rows")?)?;
            let schema = match schema {
                Some(path) => Some(
                    Schema::from_file(&path)
                        .with_context(|| format!("Failed to load schema from {}", path.display()))?,
                ),
                None => None,
            };
            let decl = schema.as_ref().and_then(|s| s.get_table(&table));

            let mut adapter = conn.adapter()?;
            let outcome = adapter.insert(&table, decl, rows).await?;
            adapter.end().await?;
            print_json(&serde_json::json!({
                "affected": outcome.affected,
                "rows": outcome.rows,
            }))?;
        }
        Commands::Bench {
            conn,
            table,
            rows,
            buffer_size,
            keep_table,
        } => {
            let config = BenchConfig {
                table,
                rows,
                buffer_size,
                keep_table,
            };
            let mut adapter = conn.adapter()?;
            let report = bench::run(&mut adapter, &config)
                .await
                .context("Benchmark failed")?;
            adapter.end().await?;
            print_json(&report)?;
        }
    }

    Ok(())
}
