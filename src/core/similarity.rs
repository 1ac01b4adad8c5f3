//! Structural cross-check of a translation result against its source.
//!
//! Only renames and nested rules are checked. Mapper, modify and insert
//! outputs are caller-defined, so meeting one of them is reported as an
//! unsupported translation type.

use crate::core::coercion::{coerce_records, describe};
use crate::domain::descriptor::{Descriptor, Entry, TranslationKind};
use crate::domain::model::{Record, Value};
use crate::utils::error::{MapTransError, Result};

/// Check that `result` is consistent with `source` under `descriptor`.
///
/// Returns `Ok(true)` when every constrained key matches. The first mismatch
/// is returned as an error describing both sides. Keys the descriptor does not
/// mention are not inspected on either side.
pub fn is_similar(source: &Record, result: &Record, descriptor: &Descriptor) -> Result<bool> {
    for (key, entry) in descriptor.iter() {
        let Some(value) = source.get(key) else {
            continue;
        };
        match entry {
            Entry::Rename(target) => compare_strings(key, value, target, result)?,
            Entry::Rule(rule) => {
                let target = rule.target_name(key);
                match rule.kind() {
                    TranslationKind::Nested(sub_descriptor) => {
                        let Value::Object(source_record) = value else {
                            return Err(MapTransError::mismatch(format!(
                                "invalid source object for '{}': {}",
                                key,
                                describe(value)
                            )));
                        };
                        let result_value = lookup(result, target)?;
                        let Value::Object(result_record) = result_value else {
                            return Err(MapTransError::mismatch(format!(
                                "invalid type for '{}': {}",
                                target,
                                describe(result_value)
                            )));
                        };
                        is_similar(source_record, result_record, sub_descriptor)?;
                    }
                    TranslationKind::NestedArray(sub_descriptor) => {
                        let source_records = coerce_records(value).map_err(|e| {
                            MapTransError::mismatch(format!(
                                "invalid source object for '{}': {}",
                                key, e
                            ))
                        })?;
                        let result_records =
                            coerce_records(lookup(result, target)?).map_err(|e| {
                                MapTransError::mismatch(format!(
                                    "invalid destination object for '{}': {}",
                                    target, e
                                ))
                            })?;
                        if source_records.len() != result_records.len() {
                            return Err(MapTransError::mismatch(format!(
                                "source and destination length for '{}': {} != {}",
                                key,
                                source_records.len(),
                                result_records.len()
                            )));
                        }
                        for (source_record, result_record) in
                            source_records.into_iter().zip(result_records)
                        {
                            is_similar(source_record, result_record, sub_descriptor)?;
                        }
                    }
                    other => {
                        return Err(MapTransError::UnsupportedTranslation {
                            kind: other.name().to_string(),
                        });
                    }
                }
            }
        }
    }
    Ok(true)
}

fn compare_strings(key: &str, value: &Value, target: &str, result: &Record) -> Result<()> {
    let Some(source_str) = value.as_str() else {
        return Err(MapTransError::mismatch(format!(
            "invalid value for '{}': {}",
            key,
            describe(value)
        )));
    };
    let Some(result_str) = result.get(target).and_then(Value::as_str) else {
        return Err(MapTransError::mismatch(format!(
            "missing string value for '{}'",
            target
        )));
    };
    if source_str != result_str {
        return Err(MapTransError::mismatch(format!(
            "values '{}' and '{}' don't match",
            source_str, result_str
        )));
    }
    Ok(())
}

fn lookup<'a>(result: &'a Record, target: &str) -> Result<&'a Value> {
    result
        .get(target)
        .ok_or_else(|| MapTransError::mismatch(format!("missing value for '{}'", target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::Rule;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_rename_match() {
        let descriptor = Descriptor::new().rename("a1", "A1");
        let source = record(json!({"a1": "foo"}));
        let result = record(json!({"A1": "foo", "C1": "ignored"}));

        assert!(is_similar(&source, &result, &descriptor).unwrap());
    }

    #[test]
    fn test_rename_mismatch_names_both_values() {
        let descriptor = Descriptor::new().rename("a1", "A1");
        let source = record(json!({"a1": "foo"}));
        let result = record(json!({"A1": "bar"}));

        let err = is_similar(&source, &result, &descriptor).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("foo") && message.contains("bar"));
    }

    #[test]
    fn test_rename_missing_target() {
        let descriptor = Descriptor::new().rename("a1", "A1");
        let source = record(json!({"a1": "foo"}));

        assert!(is_similar(&source, &Record::new(), &descriptor).is_err());
    }

    #[test]
    fn test_nested_recurses() {
        let descriptor = Descriptor::new().rule(
            "e1",
            Rule::nested(Descriptor::new().rename("e11", "E11")).target("E1"),
        );
        let source = record(json!({"e1": {"e11": "x"}}));
        let good = record(json!({"E1": {"E11": "x"}}));
        let bad = record(json!({"E1": {"E11": "y"}}));
        let wrong_type = record(json!({"E1": ["x"]}));

        assert!(is_similar(&source, &good, &descriptor).unwrap());
        assert!(is_similar(&source, &bad, &descriptor).is_err());
        assert!(matches!(
            is_similar(&source, &wrong_type, &descriptor),
            Err(MapTransError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_nested_array_compares_by_index() {
        let descriptor = Descriptor::new().rule(
            "m",
            Rule::nested_array(Descriptor::new().rename("a", "AA")).target("M"),
        );
        let source = record(json!({"m": [{"a": "1"}, {"a": "2"}]}));
        let same = record(json!({"M": [{"AA": "1"}, {"AA": "2"}]}));
        let swapped = record(json!({"M": [{"AA": "2"}, {"AA": "1"}]}));
        let shorter = record(json!({"M": [{"AA": "1"}]}));

        assert!(is_similar(&source, &same, &descriptor).unwrap());
        assert!(is_similar(&source, &swapped, &descriptor).is_err());
        let err = is_similar(&source, &shorter, &descriptor).unwrap_err();
        assert!(err.to_string().contains("2 != 1"));
    }

    #[test]
    fn test_value_rules_are_unsupported() {
        let descriptor = Descriptor::new().rule("a", Rule::custom(|v| Ok(v.clone())));
        let source = record(json!({"a": "x"}));
        let result = record(json!({"a": "x"}));

        assert!(matches!(
            is_similar(&source, &result, &descriptor),
            Err(MapTransError::UnsupportedTranslation { ref kind }) if kind == "custom"
        ));
    }

    #[test]
    fn test_absent_source_keys_are_skipped() {
        let descriptor = Descriptor::new()
            .rename("a1", "A1")
            .rule("c", Rule::custom(|v| Ok(v.clone())));
        let source = record(json!({"a1": "foo"}));
        let result = record(json!({"A1": "foo"}));

        assert!(is_similar(&source, &result, &descriptor).unwrap());
    }
}
