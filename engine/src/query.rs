//! Query compilation and matching.
//!
//! A query is a [`Value`] object. It is compiled once into a [`Filter`] tree
//! (resolving every operator key and validating every operand) and the tree
//! is then evaluated against each document. Compilation is the only place a
//! query can fail, so a scan either returns every match or nothing at all.
//!
//! ```text
//! {"name": "Ram", "age": {"$gte": 30}}      -> And[Field(name, Eq), Field(age, Gte)]
//! {"$or": [{"name": "Ram"}, {"age": 40}]}   -> Or[Field(name, Eq), Field(age, Eq)]
//! ```

use crate::operator::{is_operator_key, Operator, OperatorKind};
use crate::options::DEFAULT_MAX_QUERY_DEPTH;
use crate::value::{Map, Value};
use crate::{error::Result, Error};

/// A single test applied to a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
}

impl Predicate {
    fn compile(op: Operator, operand: &Value) -> Result<Predicate> {
        Ok(match op {
            Operator::Eq => Predicate::Eq(operand.clone()),
            Operator::Ne => Predicate::Ne(operand.clone()),
            Operator::Gt => Predicate::Gt(operand.clone()),
            Operator::Gte => Predicate::Gte(operand.clone()),
            Operator::Lt => Predicate::Lt(operand.clone()),
            Operator::Lte => Predicate::Lte(operand.clone()),
            Operator::In | Operator::Nin => {
                let candidates = operand.as_array().cloned().ok_or_else(|| {
                    Error::MalformedQuery(format!("{op} expects an array, got {}", operand.kind()))
                })?;
                if op == Operator::In {
                    Predicate::In(candidates)
                } else {
                    Predicate::Nin(candidates)
                }
            }
            _ => return Err(Error::UnsupportedOperator(op.to_string())),
        })
    }

    /// Test a field value that is present in the document.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Predicate::Eq(operand) => value.equals(operand),
            Predicate::Ne(operand) => !value.equals(operand),
            Predicate::Gt(operand) => value.greater_than(operand),
            Predicate::Gte(operand) => value.greater_than(operand) || value.equals(operand),
            Predicate::Lt(operand) => value.less_than(operand),
            Predicate::Lte(operand) => value.less_than(operand) || value.equals(operand),
            Predicate::In(candidates) => candidates.iter().any(|c| value.equals(c)),
            Predicate::Nin(candidates) => !candidates.iter().any(|c| value.equals(c)),
        }
    }
}

/// A compiled query.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every child must match. Matches everything when empty.
    And(Vec<Filter>),
    /// At least one child must match. Matches nothing when empty.
    Or(Vec<Filter>),
    /// Every predicate must hold for the named top-level field.
    /// A document without the field never matches.
    Field {
        field: String,
        predicates: Vec<Predicate>,
    },
}

impl Filter {
    /// Compile `query` with the default nesting limit.
    pub fn compile(query: &Value) -> Result<Filter> {
        Self::compile_with_depth(query, DEFAULT_MAX_QUERY_DEPTH)
    }

    /// Compile `query`, rejecting `$and`/`$or` nesting deeper than `max_depth`.
    pub fn compile_with_depth(query: &Value, max_depth: usize) -> Result<Filter> {
        let map = query.as_object().ok_or_else(|| {
            Error::MalformedQuery(format!("query must be an object, got {}", query.kind()))
        })?;
        compile_object(map, 0, max_depth)
    }

    /// Evaluate against one document. Pure; never fails.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::And(children) => children.iter().all(|f| f.matches(document)),
            Filter::Or(children) => children.iter().any(|f| f.matches(document)),
            Filter::Field { field, predicates } => match document.get(field) {
                Some(value) => predicates.iter().all(|p| p.test(value)),
                None => false,
            },
        }
    }

    /// Whether this filter accepts every document.
    pub fn is_match_all(&self) -> bool {
        matches!(self, Filter::And(children) if children.is_empty())
    }
}

fn compile_object(map: &Map, depth: usize, max_depth: usize) -> Result<Filter> {
    if depth > max_depth {
        return Err(Error::MalformedQuery(format!(
            "query nesting exceeds {max_depth} levels"
        )));
    }

    let mut clauses = Vec::with_capacity(map.len());
    for (key, value) in map {
        let clause = if is_operator_key(key) {
            compile_logical(key, value, depth, max_depth)?
        } else {
            compile_field(key, value)?
        };
        clauses.push(clause);
    }

    if clauses.len() == 1 {
        Ok(clauses.remove(0))
    } else {
        Ok(Filter::And(clauses))
    }
}

fn compile_logical(key: &str, value: &Value, depth: usize, max_depth: usize) -> Result<Filter> {
    let op = Operator::resolve(key, OperatorKind::Logical)?;
    let items = value.as_array().ok_or_else(|| {
        Error::MalformedQuery(format!("{op} expects an array, got {}", value.kind()))
    })?;

    let mut children = Vec::with_capacity(items.len());
    for item in items {
        let sub = item.as_object().ok_or_else(|| {
            Error::MalformedQuery(format!("{op} entries must be objects, got {}", item.kind()))
        })?;
        children.push(compile_object(sub, depth + 1, max_depth)?);
    }

    Ok(match op {
        Operator::Or => Filter::Or(children),
        _ => Filter::And(children),
    })
}

fn compile_field(field: &str, value: &Value) -> Result<Filter> {
    let predicates = match value.as_object() {
        Some(map) if map.keys().any(|k| is_operator_key(k)) => {
            if !map.keys().all(|k| is_operator_key(k)) {
                return Err(Error::MalformedQuery(format!(
                    "field '{field}' mixes operators and plain keys"
                )));
            }
            map.iter()
                .map(|(key, operand)| {
                    let op = Operator::resolve(key, OperatorKind::Comparison)?;
                    Predicate::compile(op, operand)
                })
                .collect::<Result<Vec<_>>>()?
        }
        // Plain values, arrays and operator-free objects are implicit equality.
        _ => vec![Predicate::Eq(value.clone())],
    };

    Ok(Filter::Field {
        field: field.to_string(),
        predicates,
    })
}
