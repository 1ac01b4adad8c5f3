use crate::core::coercion::describe;
use crate::domain::model::Value;
use anyhow::bail;

/// Native booleans, or `true`/`t`/`1` and `false`/`f`/`0` in any case.
pub fn boolean(value: &Value) -> anyhow::Result<Value> {
    Ok(Value::Bool(parse_bool(value)?))
}

/// Booleans rendered as `"True"` or `"False"`.
pub fn bool_to_string(value: &Value) -> anyhow::Result<Value> {
    let rendered = if parse_bool(value)? { "True" } else { "False" };
    Ok(Value::String(rendered.to_string()))
}

fn parse_bool(value: &Value) -> anyhow::Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(true),
            "false" | "f" | "0" => Ok(false),
            _ => bail!("invalid value '{}' for boolean", s),
        },
        other => bail!("invalid type {}", describe(other)),
    }
}

/// Non-negative integer rendered as a decimal string. Floats are truncated.
pub fn integer(value: &Value) -> anyhow::Result<Value> {
    let parsed = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(i) = n.as_i64() {
                bail!("{} should be non-negative", i)
            } else {
                match n.as_f64() {
                    Some(f) if f < 0.0 => bail!("{} should be non-negative", n),
                    // u64::MAX rounds up to 2^64 as a float, so this bound is exclusive.
                    Some(f) if f.is_finite() && f < u64::MAX as f64 => f as u64,
                    _ => bail!("{} is out of range for an integer", n),
                }
            }
        }
        Value::String(s) => match s.parse::<u64>() {
            Ok(u) if !s.starts_with('+') => u,
            _ => bail!("invalid value '{}' for an integer", s),
        },
        other => bail!("invalid type {}", describe(other)),
    };
    Ok(Value::String(parsed.to_string()))
}
