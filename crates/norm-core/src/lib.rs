//! Core types for norm-mysql.
//!
//! This crate holds the engine-neutral half of the adapter:
//!
//! - [`Value`] / [`Row`] - application values and row-like records
//! - [`FilterNode`] - recursive AND/OR/comparison filter trees
//! - [`Query`], [`SortSpec`], [`Pagination`] - what a statement targets
//! - [`TableDecl`], [`FieldDecl`], [`FieldType`], [`Schema`] - declared tables
//! - [`wire`] - decoder for the `field!op` / `!or` JSON criteria encoding
//!
//! # Architecture
//!
//! ```text
//! norm-core (this crate)
//!    │
//!    ├─── norm-mysql-types    (escaping, codec, SQL + DDL compilation)
//!    │
//!    └─── norm-mysql-adapter  (connection handle, execution)
//! ```
//!
//! # Example
//!
//! ```rust
//! use norm_core::{Direction, FilterNode, Query};
//!
//! let query = Query::new("foo")
//!     .filter(FilterNode::or(vec![
//!         FilterNode::eq("foo", "pre1"),
//!         FilterNode::like("bar", "pre"),
//!     ]))
//!     .sort("id", Direction::Desc)
//!     .skip(3);
//!
//! assert_eq!(query.page.window(), Some((1000, Some(3))));
//! ```

pub mod criteria;
pub mod query;
pub mod schema;
pub mod types;
pub mod values;
pub mod wire;

pub use criteria::{Combinator, Comparison, FilterNode, Operator};
pub use query::{Direction, Pagination, Query, SortSpec};
pub use schema::{DdlDirectives, FieldDecl, Schema, SchemaError, TableDecl};
pub use types::FieldType;
pub use values::{row, Canonical, Row, Value};
pub use wire::WireError;
