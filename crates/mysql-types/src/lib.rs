//! MySQL statement compilation for norm-core types.
//!
//! Everything here is pure and synchronous: text in, `(sql, params)` out.
//! Execution lives in `norm-mysql-adapter`.
//!
//! # Structure
//!
//! - `escape`: backtick identifier quoting
//! - `forward`: `Value` → `mysql_async::Value` (bound parameters)
//! - `reverse`: result rows → `Row` (raw, no schema reconstruction)
//! - `criteria`: `FilterNode` → predicate text + parameters
//! - `statement`: select / count / update / delete / insert / DDL statements
//! - `ddl`: `TableDecl` → `CREATE TABLE`
//!
//! # Example
//!
//! ```rust
//! use norm_core::{FilterNode, Query};
//! use norm_mysql_types::statement;
//!
//! let query = Query::new("foo")
//!     .filter(FilterNode::like("name", "oo"))
//!     .skip(3);
//! let stmt = statement::select(&query).unwrap();
//!
//! assert_eq!(stmt.sql, "SELECT * FROM `foo` WHERE `name` LIKE ? LIMIT 1000 OFFSET 3");
//! assert_eq!(stmt.params.len(), 1);
//! ```

pub mod criteria;
pub mod ddl;
pub mod error;
pub mod escape;
pub mod forward;
pub mod reverse;
pub mod statement;

pub use criteria::{compile, Predicate};
pub use ddl::{MySQLDdl, ToDdl};
pub use error::CompileError;
pub use escape::{escape_id, escape_qualified};
pub use forward::serialize;
pub use reverse::row_from_mysql;
pub use statement::Statement;
