//! Statement assembly, one builder per operation kind.
//!
//! Every builder returns SQL text with `?` placeholders plus the parameters
//! in placeholder order. Table and column names go through the identifier
//! escaper; values only ever appear in `params`.

use crate::criteria::compile;
use crate::ddl::{MySQLDdl, ToDdl};
use crate::error::CompileError;
use crate::escape::{escape_id, escape_qualified};
use crate::forward::serialize;
use mysql_async::{Params, Value as MySqlValue};
use norm_core::{Direction, Pagination, Query, Row, SortSpec, TableDecl, Value};

/// SQL text and its positional parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<MySqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, params: Vec<MySqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Parameters in the form the driver expects.
    pub fn params(&self) -> Params {
        if self.params.is_empty() {
            Params::Empty
        } else {
            Params::Positional(self.params.clone())
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// ` ORDER BY ...`, or nothing when there are no sorts.
pub fn order_by(sorts: &SortSpec) -> String {
    if sorts.is_empty() {
        return String::new();
    }
    let clauses = sorts
        .iter()
        .map(|(field, direction)| {
            let keyword = match direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!("{} {}", escape_id(field), keyword)
        })
        .collect::<Vec<_>>();
    format!(" ORDER BY {}", clauses.join(", "))
}

/// ` LIMIT n[ OFFSET m]`, or nothing when unbounded.
pub fn limit_offset(page: &Pagination) -> String {
    match page.window() {
        None => String::new(),
        Some((limit, None)) => format!(" LIMIT {limit}"),
        Some((limit, Some(offset))) => format!(" LIMIT {limit} OFFSET {offset}"),
    }
}

fn select_with(query: &Query, page: &Pagination) -> Result<Statement, CompileError> {
    let predicate = compile(query.criteria.as_ref())?;

    let sql = format!(
        "SELECT * FROM {}{}{}{}",
        escape_qualified(&query.table),
        predicate.where_clause(),
        order_by(&query.sorts),
        limit_offset(page)
    );
    Ok(Statement::with_params(sql, predicate.params))
}

/// `SELECT * FROM t [WHERE ..] [ORDER BY ..] [LIMIT n [OFFSET m]]`.
pub fn select(query: &Query) -> Result<Statement, CompileError> {
    select_with(query, &query.page)
}

/// `SELECT COUNT(*) AS count FROM (<select>) AS a`.
///
/// The inner select keeps the query's pagination only when
/// `with_pagination` is set.
pub fn count(query: &Query, with_pagination: bool) -> Result<Statement, CompileError> {
    let page = if with_pagination {
        query.page
    } else {
        Pagination::default()
    };
    let inner = select_with(query, &page)?;
    Ok(Statement::with_params(
        format!("SELECT COUNT(*) AS count FROM ({}) AS a", inner.sql),
        inner.params,
    ))
}

/// `UPDATE t SET a = ?, .. [WHERE ..]`. Set values bind before the
/// predicate's.
pub fn update(query: &Query, sets: &Row) -> Result<Statement, CompileError> {
    if sets.is_empty() {
        return Err(CompileError::EmptySet(query.table.clone()));
    }
    let predicate = compile(query.criteria.as_ref())?;

    let assignments = sets
        .keys()
        .map(|field| format!("{} = ?", escape_id(field)))
        .collect::<Vec<_>>();
    let mut params = sets.values().map(serialize).collect::<Vec<_>>();
    let where_clause = predicate.where_clause();
    params.extend(predicate.params);

    let sql = format!(
        "UPDATE {} SET {}{}",
        escape_qualified(&query.table),
        assignments.join(", "),
        where_clause
    );
    Ok(Statement::with_params(sql, params))
}

/// `DELETE FROM t [WHERE ..]`.
pub fn delete(query: &Query) -> Result<Statement, CompileError> {
    let predicate = compile(query.criteria.as_ref())?;
    let sql = format!(
        "DELETE FROM {}{}",
        escape_qualified(&query.table),
        predicate.where_clause()
    );
    Ok(Statement::with_params(sql, predicate.params))
}

/// Fields an insert fills: the declared fields when a non-empty declaration
/// is given, else every key seen across the rows in first-seen order.
pub fn insert_fields(decl: Option<&TableDecl>, rows: &[Row]) -> Vec<String> {
    if let Some(decl) = decl.filter(|d| !d.fields.is_empty()) {
        return decl.fields.iter().map(|f| f.name.clone()).collect();
    }

    let mut fields: Vec<String> = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if !fields.iter().any(|f| f == key) {
            fields.push(key.clone());
        }
    }
    fields
}

/// Multi-row `INSERT INTO t (a, b) VALUES (?, ?), (?, ?)`.
///
/// Values are flattened row by row in `fields` order; a key missing from a
/// row binds NULL.
pub fn insert(table: &str, fields: &[String], rows: &[Row]) -> Result<Statement, CompileError> {
    if rows.is_empty() {
        return Err(CompileError::NoRows(table.to_string()));
    }
    if fields.is_empty() {
        return Err(CompileError::EmptyFieldSet(table.to_string()));
    }

    let columns = fields
        .iter()
        .map(|f| escape_id(f))
        .collect::<Vec<_>>()
        .join(", ");
    let tuple = format!("({})", vec!["?"; fields.len()].join(", "));
    let tuples = vec![tuple; rows.len()].join(", ");

    let mut params = Vec::with_capacity(fields.len() * rows.len());
    for row in rows {
        for field in fields {
            params.push(serialize(row.get(field).unwrap_or(&Value::Null)));
        }
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        escape_qualified(table),
        columns,
        tuples
    );
    Ok(Statement::with_params(sql, params))
}

/// `CREATE TABLE` for a declared table.
pub fn define(decl: &TableDecl) -> Result<Statement, CompileError> {
    Ok(Statement::new(MySQLDdl.to_create_table(decl)?))
}

/// `DROP TABLE t`.
pub fn undefine(table: &str) -> Statement {
    Statement::new(MySQLDdl.to_drop_table(table))
}

/// `SELECT 1 FROM t LIMIT 1`.
pub fn probe(table: &str) -> Statement {
    Statement::new(MySQLDdl.to_probe(table))
}
