//! Update compilation for `find_and_update`.
//!
//! An update object either consists solely of update operators
//! (`{"$set": {..}, "$unset": {..}}`) or solely of plain fields, in which
//! case it replaces each matched document wholesale. Field names are flat,
//! like query fields.

use crate::operator::{is_operator_key, Operator, OperatorKind};
use crate::value::{Map, Value};
use crate::{error::Result, Error};

/// One field-level change.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Set { field: String, value: Value },
    Unset { field: String },
}

/// A compiled update.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Replace the whole document.
    Replace(Map),
    /// Apply changes in order.
    Changes(Vec<Change>),
}

impl Update {
    pub fn compile(update: &Value) -> Result<Update> {
        let map = update.as_object().ok_or_else(|| {
            Error::MalformedUpdate(format!("update must be an object, got {}", update.kind()))
        })?;

        let operators = map.keys().filter(|k| is_operator_key(k)).count();
        if operators == 0 {
            return Ok(Update::Replace(map.clone()));
        }
        if operators != map.len() {
            return Err(Error::MalformedUpdate(
                "cannot mix update operators with plain fields".to_string(),
            ));
        }

        let mut changes = Vec::new();
        for (key, operand) in map {
            let op = Operator::resolve(key, OperatorKind::Update)?;
            let fields = operand.as_object().ok_or_else(|| {
                Error::MalformedUpdate(format!("{op} expects an object, got {}", operand.kind()))
            })?;
            for (field, value) in fields {
                if is_operator_key(field) {
                    return Err(Error::MalformedUpdate(format!(
                        "{op} cannot target operator key '{field}'"
                    )));
                }
                changes.push(match op {
                    Operator::Set => Change::Set {
                        field: field.clone(),
                        value: value.clone(),
                    },
                    _ => Change::Unset {
                        field: field.clone(),
                    },
                });
            }
        }

        Ok(Update::Changes(changes))
    }

    /// Apply to a stored document. Documents are always objects, so this
    /// cannot fail once the update has compiled.
    pub fn apply(&self, document: &mut Value) {
        match self {
            Update::Replace(map) => *document = Value::Object(map.clone()),
            Update::Changes(changes) => {
                let Some(fields) = document.as_object_mut() else {
                    return;
                };
                for change in changes {
                    match change {
                        Change::Set { field, value } => {
                            fields.insert(field.clone(), value.clone());
                        }
                        Change::Unset { field } => {
                            fields.shift_remove(field);
                        }
                    }
                }
            }
        }
    }
}
