//! Compilation errors.

use thiserror::Error;

/// Input that cannot be turned into a statement.
///
/// The typed model makes most malformed input unrepresentable; what remains
/// are empty collections where the SQL grammar needs at least one element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An AND/OR group below the top level has no children.
    #[error("Empty {0} group inside criteria")]
    EmptyGroup(&'static str),

    /// UPDATE with nothing to set.
    #[error("Nothing to set when updating table '{0}'")]
    EmptySet(String),

    /// INSERT with no columns to fill.
    #[error("No fields to insert into table '{0}'")]
    EmptyFieldSet(String),

    /// INSERT with no rows.
    #[error("No rows to insert into table '{0}'")]
    NoRows(String),

    /// A declared field collides with the implicit key column.
    #[error("Field '{column}' of table '{table}' is reserved for the primary key")]
    ReservedColumn { table: String, column: String },
}
