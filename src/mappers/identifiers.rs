use crate::domain::model::Value;
use crate::mappers::strings::expect_str;
use anyhow::bail;
use regex::Regex;
use std::sync::LazyLock;

static VALID_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][0-9A-Za-z_]*$").expect("identifier pattern"));

// Not anchored at the end: trailing text after a well-formed UUID is accepted.
static VALID_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("uuid pattern")
});

/// A letter or underscore followed by letters, digits or underscores.
pub fn identifier(value: &Value) -> anyhow::Result<Value> {
    let raw = expect_str(value)?;
    if !VALID_ID.is_match(raw) {
        bail!("{} is not a valid identifier", raw);
    }
    Ok(Value::String(raw.trim().to_string()))
}

/// Canonical 8-4-4-4-12 hex UUID, matched as a prefix of the trimmed string.
pub fn uuid(value: &Value) -> anyhow::Result<Value> {
    let trimmed = expect_str(value)?.trim();
    if !VALID_UUID.is_match(trimmed) {
        bail!("{} is not a valid UUID", trimmed);
    }
    Ok(Value::String(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier() {
        assert_eq!(identifier(&json!("Hello0World")).unwrap(), json!("Hello0World"));
        assert_eq!(identifier(&json!("_private")).unwrap(), json!("_private"));
        assert!(identifier(&json!("a$")).is_err());
        assert!(identifier(&json!("0abc")).is_err());
        assert!(identifier(&json!(" padded")).is_err());
        assert!(identifier(&json!(42)).is_err());
    }

    #[test]
    fn test_uuid_well_formed() {
        let id = "fc62e0eb-7969-5c24-b83f-955bf7f4ad0b";
        assert_eq!(uuid(&json!(id)).unwrap(), json!(id));
        assert_eq!(uuid(&json!(format!("  {}  ", id))).unwrap(), json!(id));
    }

    #[test]
    fn test_uuid_truncated_is_rejected() {
        assert!(uuid(&json!("cb89a4a9-7a7e-59ea-a0f2")).is_err());
        assert!(uuid(&json!("not-a-uuid")).is_err());
    }

    #[test]
    fn test_uuid_accepts_trailing_text() {
        let value = json!("fc62e0eb-7969-5c24-b83f-955bf7f4ad0b-trailing");
        assert_eq!(uuid(&value).unwrap(), value);
    }
}
