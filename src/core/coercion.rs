use crate::domain::model::{Record, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("expected a sequence of records, got {found}")]
    NotASequence { found: String },

    #[error("element {index} is not a record: {found}")]
    NotARecord { index: usize, found: String },
}

/// Coerce a value into an ordered sequence of records.
///
/// `null` is an empty sequence. Element order is preserved and the records
/// are borrowed from `value`.
pub fn coerce_records(value: &Value) -> Result<Vec<&Record>, CoercionError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(CoercionError::NotARecord {
                    index,
                    found: describe(other),
                }),
            })
            .collect(),
        other => Err(CoercionError::NotASequence {
            found: describe(other),
        }),
    }
}

/// Short type-and-value rendering for error messages.
pub(crate) fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("{} {}", kind, value)
}
