use crate::core::coercion::describe;
use crate::domain::model::Value;
use anyhow::{anyhow, bail};

/// Pass the value through unchanged.
pub fn id(value: &Value) -> anyhow::Result<Value> {
    Ok(value.clone())
}

/// Copy a string, trimming leading and trailing whitespace.
pub fn string(value: &Value) -> anyhow::Result<Value> {
    Ok(Value::String(expect_str(value)?.trim().to_string()))
}

pub fn lower(value: &Value) -> anyhow::Result<Value> {
    Ok(Value::String(expect_str(value)?.to_lowercase().trim().to_string()))
}

pub fn upper(value: &Value) -> anyhow::Result<Value> {
    Ok(Value::String(expect_str(value)?.to_uppercase().trim().to_string()))
}

/// A sequence of strings. `null` stays `null`.
pub fn string_array(value: &Value) -> anyhow::Result<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if !item.is_string() {
                    bail!(
                        "invalid argument type: element {} is {}",
                        index,
                        describe(item)
                    );
                }
            }
            Ok(value.clone())
        }
        other => bail!("invalid argument type: {}", describe(other)),
    }
}

pub(crate) fn expect_str(value: &Value) -> anyhow::Result<&str> {
    value
        .as_str()
        .ok_or_else(|| anyhow!("invalid type {}", describe(value)))
}
