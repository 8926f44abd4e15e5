//! Criteria compilation: `FilterNode` → SQL predicate + bound parameters.
//!
//! Placeholders and parameters are produced by the same depth-first,
//! left-to-right walk, so the n-th `?` in the text always pairs with the n-th
//! parameter.

use crate::error::CompileError;
use crate::escape::escape_id;
use crate::forward::serialize;
use mysql_async::Value as MySqlValue;
use norm_core::{Combinator, Comparison, FilterNode, Operator, Value};

/// A compiled boolean expression. Empty `sql` means "no predicate".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<MySqlValue>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// ` WHERE <sql>`, or nothing for an empty predicate.
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.sql)
        }
    }
}

/// SQL token for an operator.
pub fn operator_token(operator: Operator) -> &'static str {
    match operator {
        Operator::Eq => "=",
        Operator::Ne => "<>",
        Operator::Gt => ">",
        Operator::Lt => "<",
        Operator::Gte => ">=",
        Operator::Lte => "<=",
        Operator::Like => "LIKE",
    }
}

/// Wrap a LIKE operand as `%value%`.
pub fn like_pattern(value: &Value) -> Value {
    Value::String(format!("%{}%", like_text(value)))
}

/// Plain text of a LIKE operand, as the engine would render the column.
fn like_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        Value::Time(t) => t.format("%H:%M:%S%.f").to_string(),
        Value::Custom(hook) => like_text(&hook.to_canonical()),
        other => match other.to_json() {
            serde_json::Value::String(s) => s,
            json => json.to_string(),
        },
    }
}

fn keyword(kind: Combinator) -> &'static str {
    match kind {
        Combinator::And => "AND",
        Combinator::Or => "OR",
    }
}

/// Compile an optional filter tree. `None` and a top-level group with no
/// children both give the empty predicate.
pub fn compile(node: Option<&FilterNode>) -> Result<Predicate, CompileError> {
    let mut predicate = Predicate::default();
    match node {
        None => {}
        Some(FilterNode::Group { children, .. }) if children.is_empty() => {}
        Some(node) => {
            predicate.sql = compile_node(node, true, &mut predicate.params)?;
        }
    }
    Ok(predicate)
}

fn compile_node(
    node: &FilterNode,
    top_level: bool,
    params: &mut Vec<MySqlValue>,
) -> Result<String, CompileError> {
    match node {
        FilterNode::Comparison(comparison) => Ok(compile_comparison(comparison, params)),
        FilterNode::Group { kind, children } => {
            if children.is_empty() {
                return Err(CompileError::EmptyGroup(keyword(*kind)));
            }
            let parts = children
                .iter()
                .map(|child| compile_node(child, false, params))
                .collect::<Result<Vec<_>, _>>()?;
            let joined = parts.join(&format!(" {} ", keyword(*kind)));
            if top_level {
                Ok(joined)
            } else {
                Ok(format!("({joined})"))
            }
        }
    }
}

fn compile_comparison(comparison: &Comparison, params: &mut Vec<MySqlValue>) -> String {
    let value = match comparison.operator {
        Operator::Like => serialize(&like_pattern(&comparison.value)),
        _ => serialize(&comparison.value),
    };
    params.push(value);
    format!(
        "{} {} ?",
        escape_id(&comparison.field),
        operator_token(comparison.operator)
    )
}
