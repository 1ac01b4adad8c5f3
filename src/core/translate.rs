//! The transform engine.
//!
//! Translation runs in three phases over one descriptor:
//!
//! 1. every mandatory source field must be present, otherwise nothing is produced;
//! 2. each descriptor entry whose key exists in the source is applied, in
//!    declaration order;
//! 3. `Insert` rules fill in targets that are still absent.
//!
//! Source fields without a descriptor entry never reach the result.

use crate::core::coercion::{coerce_records, describe};
use crate::domain::descriptor::{Descriptor, Entry, Rule, TranslationKind};
use crate::domain::model::{Record, Value};
use crate::mappers;
use crate::utils::error::{MapTransError, Result};

/// Translate `source` according to `descriptor`.
///
/// `None` means no translation: the source is returned as is. The source is
/// never modified and the result is a fresh record.
pub fn translate(source: &Record, descriptor: Option<&Descriptor>) -> Result<Record> {
    let Some(descriptor) = descriptor else {
        return Ok(source.clone());
    };

    check_mandatory(source, descriptor)?;

    let mut result = Record::new();
    translate_fields(source, descriptor, &mut result)?;
    insert_missing(source, descriptor, &mut result)?;
    Ok(result)
}

fn check_mandatory(source: &Record, descriptor: &Descriptor) -> Result<()> {
    for (key, entry) in descriptor.iter() {
        if let Entry::Rule(rule) = entry {
            if rule.is_mandatory() && !source.contains_key(key) {
                tracing::debug!("mandatory attribute '{}' is missing", key);
                return Err(MapTransError::missing_attribute(key));
            }
        }
    }
    Ok(())
}

fn translate_fields(source: &Record, descriptor: &Descriptor, result: &mut Record) -> Result<()> {
    for key in source.keys().filter(|key| !descriptor.contains_key(key)) {
        tracing::trace!("dropping '{}': no descriptor entry", key);
    }

    for (key, entry) in descriptor.iter() {
        let Some(value) = source.get(key) else {
            continue;
        };
        match entry {
            Entry::Rename(target) => {
                let normalized = mappers::string(value)
                    .map_err(|e| MapTransError::invalid_property(key, e))?;
                result.insert(target.clone(), normalized);
            }
            Entry::Rule(rule) => apply_rule(source, key, value, rule, result)?,
        }
    }
    Ok(())
}

fn apply_rule(
    source: &Record,
    key: &str,
    value: &Value,
    rule: &Rule,
    result: &mut Record,
) -> Result<()> {
    let target = rule.target_name(key);
    match rule.kind() {
        TranslationKind::Custom(map_fn) => {
            let mapped = map_fn(value).map_err(|e| MapTransError::invalid_property(key, e))?;
            result.insert(target.to_string(), mapped);
        }
        TranslationKind::Nested(sub_descriptor) => {
            let Value::Object(record) = value else {
                return Err(MapTransError::internal(format!(
                    "invalid type for '{}': expected a record, got {}",
                    key,
                    describe(value)
                )));
            };
            tracing::trace!("translating nested record '{}' into '{}'", key, target);
            let translated = translate(record, Some(sub_descriptor))?;
            result.insert(target.to_string(), Value::Object(translated));
        }
        TranslationKind::NestedArray(sub_descriptor) => {
            let records = coerce_records(value)
                .map_err(|e| MapTransError::internal(format!("field '{}': {}", key, e)))?;
            tracing::trace!(
                "translating {} nested records of '{}' into '{}'",
                records.len(),
                key,
                target
            );
            let translated = records
                .into_iter()
                .map(|record| translate(record, Some(sub_descriptor)).map(Value::Object))
                .collect::<Result<Vec<_>>>()?;
            result.insert(target.to_string(), Value::Array(translated));
        }
        TranslationKind::Modify(mod_fn) => {
            mod_fn(source, result, value).map_err(|e| MapTransError::invalid_property(key, e))?;
        }
        // Applied after every field has been translated.
        TranslationKind::Insert(_) => {}
    }
    Ok(())
}

fn insert_missing(source: &Record, descriptor: &Descriptor, result: &mut Record) -> Result<()> {
    for (key, entry) in descriptor.iter() {
        let Entry::Rule(rule) = entry else {
            continue;
        };
        let TranslationKind::Insert(insert_fn) = rule.kind() else {
            continue;
        };
        let target = rule.target_name(key);
        if result.contains_key(target) {
            tracing::trace!("'{}' already present, insert skipped", target);
            continue;
        }
        let value = insert_fn(source, result, key)?;
        result.insert(target.to_string(), value);
    }
    Ok(())
}
