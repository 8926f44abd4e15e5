//! Table declarations.
//!
//! A [`Schema`] is a list of [`TableDecl`]s, normally loaded from a YAML file:
//!
//! ```yaml
//! tables:
//!   - name: foo
//!     fields:
//!       - name: fstr
//!         type: string
//!       - name: fcustomtype
//!         type: string
//!         ddl:
//!           type: VARCHAR(25)
//!       - name: fextra
//!         type: integer
//!         ddl:
//!           override: INT NOT NULL DEFAULT 0
//!       - name: email
//!         type: string
//!         required: true
//!         unique: true
//! ```
//!
//! The `ddl` block is a side channel read only by DDL generation; it never
//! changes how values are bound.

use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),
}

/// Per-field DDL directives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DdlDirectives {
    /// Replaces the whole generated column clause (after the name).
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub override_ddl: Option<String>,

    /// Replaces only the column type token.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

impl DdlDirectives {
    pub fn is_empty(&self) -> bool {
        self.override_ddl.is_none() && self.column_type.is_none()
    }
}

/// A declared field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "DdlDirectives::is_empty")]
    pub ddl: DdlDirectives,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub unique: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ddl: DdlDirectives::default(),
            required: false,
            unique: false,
        }
    }

    /// Set the `ddl.type` directive.
    pub fn with_ddl_type(mut self, column_type: impl Into<String>) -> Self {
        self.ddl.column_type = Some(column_type.into());
        self
    }

    /// Set the `ddl.override` directive.
    pub fn with_ddl_override(mut self, clause: impl Into<String>) -> Self {
        self.ddl.override_ddl = Some(clause.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A declared table. The `id` key column is implicit and never declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableDecl {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl TableDecl {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A set of table declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    #[serde(default)]
    pub tables: Vec<TableDecl>,
}

impl Schema {
    pub fn new(tables: Vec<TableDecl>) -> Self {
        Self { tables }
    }

    /// Load a schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn get_table(&self, name: &str) -> Option<&TableDecl> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Like [`Self::get_table`] but reports a missing table as an error.
    pub fn table(&self, name: &str) -> Result<&TableDecl, SchemaError> {
        self.get_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
