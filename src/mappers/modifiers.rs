use crate::core::coercion::describe;
use crate::domain::model::{Record, Value};
use anyhow::bail;

/// Copy every key of a record value into the result, lifting it one level.
pub fn flatten(_source: &Record, result: &mut Record, value: &Value) -> anyhow::Result<()> {
    let Value::Object(fields) = value else {
        bail!("cannot flatten {}", describe(value));
    };
    for (key, field) in fields {
        result.insert(key.clone(), field.clone());
    }
    Ok(())
}
