//! Operation-level API: compile, execute, shape the result.

use crate::client::{ExecResult, Executor, MySQLConnection};
use crate::error::AdapterError;
use mysql_async::Opts;
use norm_core::{Query, Row, TableDecl, Value};
use norm_mysql_types::statement;
use tracing::{debug, info};

/// Result of an insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertOutcome {
    pub affected: u64,
    /// The inserted rows, each carrying its assigned `id` when the server
    /// reported one.
    pub rows: Vec<Row>,
}

impl InsertOutcome {
    pub fn ids(&self) -> Vec<u64> {
        self.rows
            .iter()
            .filter_map(|row| row.get("id").and_then(Value::as_u64))
            .collect()
    }
}

/// MySQL adapter over a single logical connection.
pub struct MySQLAdapter<E: Executor = MySQLConnection> {
    executor: E,
}

impl MySQLAdapter<MySQLConnection> {
    /// Adapter over a lazily-opened connection. Nothing is dialed until the
    /// first operation.
    pub fn connect(opts: Opts) -> Self {
        Self::new(MySQLConnection::new(opts))
    }

    pub fn from_url(url: &str) -> Result<Self, AdapterError> {
        Ok(Self::new(MySQLConnection::from_url(url)?))
    }
}

impl<E: Executor> MySQLAdapter<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Rows matching the query, in engine order.
    pub async fn load(&mut self, query: &Query) -> Result<Vec<Row>, AdapterError> {
        let stmt = statement::select(query)?;
        Ok(self.executor.execute(&stmt).await?.rows)
    }

    /// Number of matching rows. Pagination applies only when
    /// `with_pagination` is set.
    pub async fn count(&mut self, query: &Query, with_pagination: bool) -> Result<u64, AdapterError> {
        let stmt = statement::count(query, with_pagination)?;
        let result = self.executor.execute(&stmt).await?;
        read_count(&result)
    }

    /// Insert all rows with one multi-row statement.
    ///
    /// Field names come from `decl` when it declares any, else from the keys
    /// of the rows. Assigned ids are derived from the first generated id as a
    /// contiguous run, which holds for a single multi-row INSERT under
    /// `innodb_autoinc_lock_mode` 0 or 1.
    pub async fn insert(
        &mut self,
        table: &str,
        decl: Option<&TableDecl>,
        mut rows: Vec<Row>,
    ) -> Result<InsertOutcome, AdapterError> {
        if rows.is_empty() {
            return Ok(InsertOutcome::default());
        }

        let fields = statement::insert_fields(decl, &rows);
        let stmt = statement::insert(table, &fields, &rows)?;
        let result = self.executor.execute(&stmt).await?;

        match result.last_insert_id.filter(|id| *id > 0) {
            Some(first) => {
                for (row, id) in rows.iter_mut().zip(first..) {
                    row.insert("id".to_string(), Value::UInt(id));
                }
            }
            None => debug!("No generated id reported for insert into {table}"),
        }

        Ok(InsertOutcome {
            affected: result.affected_rows,
            rows,
        })
    }

    /// Apply `sets` to every matching row. Without criteria this touches the
    /// whole table.
    pub async fn update(&mut self, query: &Query, sets: &Row) -> Result<u64, AdapterError> {
        let stmt = statement::update(query, sets)?;
        Ok(self.executor.execute(&stmt).await?.affected_rows)
    }

    pub async fn delete(&mut self, query: &Query) -> Result<u64, AdapterError> {
        let stmt = statement::delete(query)?;
        Ok(self.executor.execute(&stmt).await?.affected_rows)
    }

    pub async fn define(&mut self, decl: &TableDecl) -> Result<(), AdapterError> {
        let stmt = statement::define(decl)?;
        self.executor.execute(&stmt).await?;
        info!("Created table {}", decl.name);
        Ok(())
    }

    pub async fn undefine(&mut self, table: &str) -> Result<(), AdapterError> {
        self.executor.execute(&statement::undefine(table)).await?;
        info!("Dropped table {table}");
        Ok(())
    }

    /// Whether `table` exists. Any probe failure reads as `false`.
    pub async fn defined(&mut self, table: &str) -> bool {
        match self.executor.execute(&statement::probe(table)).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Probe for table {table} failed: {e}");
                false
            }
        }
    }

    pub async fn begin(&mut self) -> Result<(), AdapterError> {
        self.executor.execute_text("START TRANSACTION").await
    }

    pub async fn commit(&mut self) -> Result<(), AdapterError> {
        self.executor.execute_text("COMMIT").await
    }

    pub async fn rollback(&mut self) -> Result<(), AdapterError> {
        self.executor.execute_text("ROLLBACK").await
    }

    /// Release the connection.
    pub async fn end(&mut self) -> Result<(), AdapterError> {
        self.executor.close().await
    }
}

fn read_count(result: &ExecResult) -> Result<u64, AdapterError> {
    let value = result
        .rows
        .first()
        .and_then(|row| row.get("count"))
        .ok_or_else(|| AdapterError::UnexpectedResult("count query returned no rows".into()))?;

    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| AdapterError::UnexpectedResult(format!("non-numeric count: {value:?}")))
}
