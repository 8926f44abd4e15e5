//! MySQL DDL generation from table declarations.
//!
//! Converts a [`TableDecl`] into `CREATE TABLE` text. Every table gets an
//! implicit auto-increment `id` key column ahead of its declared fields.
//! Per-field `ddl` directives can replace the type token (`ddl.type`) or the
//! whole column clause (`ddl.override`).

use crate::error::CompileError;
use crate::escape::{escape_id, escape_qualified};
use norm_core::{FieldDecl, FieldType, TableDecl};

/// Trait for generating DDL type strings.
pub trait ToDdl {
    /// Convert an abstract field type to a DDL type string.
    fn to_ddl(&self, field_type: &FieldType) -> String;

    /// Generate a complete CREATE TABLE statement.
    fn to_create_table(&self, table: &TableDecl) -> Result<String, CompileError>;
}

/// MySQL DDL generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySQLDdl;

impl MySQLDdl {
    /// Column type for abstract types with no table entry.
    pub const DEFAULT_TYPE: &'static str = "VARCHAR(255)";

    /// Name of the implicit key column.
    pub const ID_COLUMN: &'static str = "id";

    /// Clause of the implicit key column.
    pub const ID_CLAUSE: &'static str = "INT PRIMARY KEY AUTO_INCREMENT";

    /// Column clause for one declared field, without the trailing comma.
    pub fn column_clause(&self, field: &FieldDecl) -> String {
        let name = escape_id(&field.name);

        if let Some(clause) = &field.ddl.override_ddl {
            return format!("{} {}", name, clause.trim());
        }

        let column_type = field
            .ddl
            .column_type
            .as_deref()
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| self.to_ddl(&field.field_type));
        let null_clause = if field.required { "NOT NULL" } else { "NULL" };

        let mut clause = format!("{name} {column_type} {null_clause}");
        if field.unique {
            clause.push_str(" UNIQUE");
        }
        clause
    }

    /// Generate a DROP TABLE statement.
    pub fn to_drop_table(&self, table_name: &str) -> String {
        format!("DROP TABLE {}", escape_qualified(table_name))
    }

    /// Generate the cheap existence probe for a table.
    pub fn to_probe(&self, table_name: &str) -> String {
        format!("SELECT 1 FROM {} LIMIT 1", escape_qualified(table_name))
    }
}

impl ToDdl for MySQLDdl {
    fn to_ddl(&self, field_type: &FieldType) -> String {
        match field_type {
            FieldType::String => "VARCHAR(255)".to_string(),
            FieldType::Text => "TEXT".to_string(),
            FieldType::Integer => "INT".to_string(),
            FieldType::Double => "DOUBLE".to_string(),

            // Boolean - MySQL uses TINYINT(1)
            FieldType::Boolean => "TINYINT(1)".to_string(),

            FieldType::Datetime => "DATETIME".to_string(),
            FieldType::Date => "DATE".to_string(),

            // Widest exact decimal MySQL accepts
            FieldType::Big => "DECIMAL(65,30)".to_string(),

            // Structures are bound as JSON text
            FieldType::Map => "TEXT".to_string(),
            FieldType::List => "TEXT".to_string(),

            FieldType::Other(_) => Self::DEFAULT_TYPE.to_string(),
        }
    }

    fn to_create_table(&self, table: &TableDecl) -> Result<String, CompileError> {
        if let Some(field) = table
            .fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(Self::ID_COLUMN))
        {
            return Err(CompileError::ReservedColumn {
                table: table.name.clone(),
                column: field.name.clone(),
            });
        }

        let mut column_defs = vec![format!(
            "  {} {}",
            escape_id(Self::ID_COLUMN),
            Self::ID_CLAUSE
        )];
        column_defs.extend(
            table
                .fields
                .iter()
                .map(|field| format!("  {}", self.column_clause(field))),
        );

        Ok(format!(
            "CREATE TABLE {} (\n{}\n)",
            escape_qualified(&table.name),
            column_defs.join(",\n")
        ))
    }
}
