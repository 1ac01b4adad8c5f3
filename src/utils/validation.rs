use crate::utils::error::{MapTransError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MapTransError::ValidationError {
            field: field_name.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MapTransError::ValidationError {
        field: field_name.to_string(),
        reason: "Value is required".to_string(),
    })
}

pub fn validate_known_name(field_name: &str, value: &str, known: &[&str]) -> Result<()> {
    if !known.contains(&value) {
        return Err(MapTransError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Unknown name '{}'. Known names: {}", value, known.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(MapTransError::ValidationError {
                field: field_name.to_string(),
                reason: format!("Duplicate entry '{}'", value),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("source", "A1").is_ok());
        assert!(validate_non_empty_string("source", "   ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("a1".to_string());
        assert_eq!(validate_required_field("target", &present).unwrap(), "a1");
        let absent: Option<String> = None;
        assert!(validate_required_field("target", &absent).is_err());
    }

    #[test]
    fn test_validate_known_name() {
        assert!(validate_known_name("mapper", "uuid", &["uuid", "ip"]).is_ok());
        let err = validate_known_name("mapper", "guid", &["uuid", "ip"]).unwrap_err();
        assert!(err.to_string().contains("uuid, ip"));
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("fields", ["a", "b"]).is_ok());
        assert!(validate_unique("fields", ["a", "b", "a"]).is_err());
    }
}
