//! Insert benchmark.
//!
//! Inserts `rows` two-column rows into a scratch table inside one
//! transaction, flushing a multi-row INSERT every `buffer_size` rows.

use norm_core::{FieldDecl, FieldType, Row, TableDecl, Value};
use norm_mysql_adapter::{AdapterError, Executor, MySQLAdapter};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_ROWS: u64 = 10_000;
pub const DEFAULT_BUFFER_SIZE: usize = 1_000;

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub table: String,
    pub rows: u64,
    pub buffer_size: usize,
    /// Leave the scratch table in place afterwards.
    pub keep_table: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            table: "foo".to_string(),
            rows: DEFAULT_ROWS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            keep_table: false,
        }
    }
}

impl BenchConfig {
    pub fn table_decl(&self) -> TableDecl {
        TableDecl::new(
            self.table.clone(),
            vec![
                FieldDecl::new("foo", FieldType::String),
                FieldDecl::new("bar", FieldType::String),
            ],
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub rows: u64,
    pub batches: u64,
    pub elapsed_secs: f64,
    pub rows_per_sec: f64,
}

impl BenchReport {
    fn new(rows: u64, batches: u64, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let rows_per_sec = if elapsed_secs > 0.0 {
            rows as f64 / elapsed_secs
        } else {
            0.0
        };
        Self {
            rows,
            batches,
            elapsed_secs,
            rows_per_sec,
        }
    }
}

fn bench_row(i: u64) -> Row {
    let text = Value::String(i.to_string());
    Row::from([("foo".to_string(), text.clone()), ("bar".to_string(), text)])
}

/// Run the benchmark. The scratch table is recreated first and dropped at
/// the end unless `keep_table` is set.
pub async fn run<E: Executor>(
    adapter: &mut MySQLAdapter<E>,
    config: &BenchConfig,
) -> Result<BenchReport, AdapterError> {
    let decl = config.table_decl();
    if adapter.defined(&decl.name).await {
        adapter.undefine(&decl.name).await?;
    }
    adapter.define(&decl).await?;

    let result = insert_all(adapter, config, &decl).await;

    if !config.keep_table {
        if let Err(e) = adapter.undefine(&decl.name).await {
            warn!("Failed to drop benchmark table {}: {e}", decl.name);
        }
    }

    let report = result?;
    info!(
        "Inserted {} rows in {:.3}s ({:.1} rows/s)",
        report.rows, report.elapsed_secs, report.rows_per_sec
    );
    Ok(report)
}

async fn insert_all<E: Executor>(
    adapter: &mut MySQLAdapter<E>,
    config: &BenchConfig,
    decl: &TableDecl,
) -> Result<BenchReport, AdapterError> {
    let buffer_size = config.buffer_size.max(1);
    let start = Instant::now();
    adapter.begin().await?;

    let mut inserted = 0;
    let mut batches = 0;
    let mut buffer = Vec::with_capacity(buffer_size);
    for i in 1..=config.rows {
        buffer.push(bench_row(i));
        if buffer.len() == buffer_size || i == config.rows {
            let batch = std::mem::replace(&mut buffer, Vec::with_capacity(buffer_size));
            match adapter.insert(&decl.name, Some(decl), batch).await {
                Ok(outcome) => {
                    inserted += outcome.affected;
                    batches += 1;
                    debug!("Flushed batch {batches} ({inserted} rows so far)");
                }
                Err(e) => {
                    if let Err(rollback) = adapter.rollback().await {
                        warn!("Rollback failed: {rollback}");
                    }
                    return Err(e);
                }
            }
        }
    }

    adapter.commit().await?;
    Ok(BenchReport::new(inserted, batches, start.elapsed()))
}
