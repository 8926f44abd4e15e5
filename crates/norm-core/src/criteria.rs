//! Filter trees.
//!
//! A [`FilterNode`] is either a single comparison or an AND/OR group of child
//! nodes. Groups nest to any depth.

use crate::values::Value;
use crate::wire::WireError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    /// Substring match. The bound value is always wrapped as `%value%`.
    Like,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Lt,
        Self::Gte,
        Self::Lte,
        Self::Like,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Like => "like",
        }
    }
}

impl FromStr for Operator {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| WireError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a group combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
}

/// `field <operator> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

/// Recursive filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Comparison(Comparison),
    Group {
        kind: Combinator,
        children: Vec<FilterNode>,
    },
}

impl FilterNode {
    pub fn compare(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self::Comparison(Comparison {
            field: field.into(),
            operator,
            value: value.into(),
        })
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Gt, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Lt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Gte, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Lte, value)
    }

    pub fn like(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Like, value)
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        Self::Group {
            kind: Combinator::And,
            children,
        }
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        Self::Group {
            kind: Combinator::Or,
            children,
        }
    }

    /// Number of comparison leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Comparison(_) => 1,
            Self::Group { children, .. } => children.iter().map(FilterNode::leaf_count).sum(),
        }
    }

    /// Comparisons in left-to-right order.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Self::Comparison(c) => out.push(c),
            Self::Group { children, .. } => {
                for child in children {
                    child.collect_comparisons(out);
                }
            }
        }
    }
}
