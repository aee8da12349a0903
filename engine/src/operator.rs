//! Reserved operator keys.
//!
//! Any key starting with [`OPERATOR_PREFIX`] is an operator. Recognized
//! operators resolve to [`Operator`]; everything else with the prefix is
//! rejected with [`Error::UnsupportedOperator`] instead of being treated as a
//! field name.

use crate::{error::Result, Error};
use std::fmt;

/// Marker that introduces an operator key.
pub const OPERATOR_PREFIX: char = '$';

/// Where an operator is allowed to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Combines sub-queries at the top level of a query object.
    Logical,
    /// Tests a single field inside a field operator object.
    Comparison,
    /// Mutates a matched document.
    Update,
}

/// Every operator the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Set,
    Unset,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::And,
        Operator::Or,
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::Nin,
        Operator::Set,
        Operator::Unset,
    ];

    /// The key spelling, prefix included.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "$and",
            Operator::Or => "$or",
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::Set => "$set",
            Operator::Unset => "$unset",
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            Operator::And | Operator::Or => OperatorKind::Logical,
            Operator::Set | Operator::Unset => OperatorKind::Update,
            _ => OperatorKind::Comparison,
        }
    }

    /// Look up an operator by its exact key.
    pub fn from_key(key: &str) -> Option<Operator> {
        Self::ALL.into_iter().find(|op| op.as_str() == key)
    }

    /// Resolve `key` as an operator that must be of `kind`.
    ///
    /// Unknown operators, and known operators used where they do not belong
    /// (e.g. `$set` inside a filter), fail with `UnsupportedOperator`.
    pub fn resolve(key: &str, kind: OperatorKind) -> Result<Operator> {
        match Self::from_key(key) {
            Some(op) if op.kind() == kind => Ok(op),
            _ => Err(Error::UnsupportedOperator(key.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `key` uses the operator prefix.
pub fn is_operator_key(key: &str) -> bool {
    key.starts_with(OPERATOR_PREFIX)
}
