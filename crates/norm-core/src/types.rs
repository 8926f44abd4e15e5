//! Abstract field types.
//!
//! `FieldType` is the engine-neutral tag a table declaration carries for each
//! field. Each engine crate maps the tag to its own column type; the MySQL
//! mapping lives in `norm-mysql-types`.
//!
//! # YAML Format
//!
//! Types are written as plain strings:
//! ```yaml
//! type: string
//! type: integer
//! type: datetime
//! ```
//!
//! The `n`-prefixed schema names (`nstring`, `ninteger`, ...) are accepted as
//! aliases. Any other name is kept verbatim as [`FieldType::Other`] and falls
//! back to the engine's default column type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Abstract type of a declared field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Short character data
    String,
    /// Long character data
    Text,
    /// Signed integer
    Integer,
    /// Double precision float
    Double,
    /// True/false
    Boolean,
    /// Date and time of day
    Datetime,
    /// Calendar date
    Date,
    /// Arbitrary precision decimal
    Big,
    /// Key/value structure, stored as JSON text
    Map,
    /// Ordered list, stored as JSON text
    List,
    /// A type name with no entry in the type table
    Other(String),
}

impl FieldType {
    /// Canonical name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Big => "big",
            Self::Map => "map",
            Self::List => "list",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "string" | "nstring" | "str" => Self::String,
            "text" | "ntext" => Self::Text,
            "integer" | "ninteger" | "int" => Self::Integer,
            "double" | "ndouble" | "float" => Self::Double,
            "boolean" | "nboolean" | "bool" => Self::Boolean,
            "datetime" | "ndatetime" | "date_time" => Self::Datetime,
            "date" | "ndate" => Self::Date,
            "big" | "nbig" | "decimal" => Self::Big,
            "map" | "nmap" | "object" => Self::Map,
            "list" | "nlist" | "array" => Self::List,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        // Infallible: unknown names become `Other`
        match name.parse() {
            Ok(field_type) => Ok(field_type),
            Err(never) => match never {},
        }
    }
}
