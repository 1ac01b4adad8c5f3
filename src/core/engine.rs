use crate::core::coercion::describe;
use crate::core::{is_similar, translate};
use crate::domain::descriptor::Descriptor;
use crate::domain::model::Value;
use crate::utils::error::{MapTransError, Result};

/// Applies one long-lived descriptor to whole JSON documents: a single
/// record or an array of records.
pub struct TranslationEngine {
    descriptor: Descriptor,
    verifier: Option<Descriptor>,
}

impl TranslationEngine {
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            verifier: None,
        }
    }

    /// Also check every result against its source using the inverted
    /// descriptor.
    ///
    /// Renamed strings are compared exactly. Renames trim their values, so a
    /// source value with surrounding whitespace is reported as a
    /// [`MapTransError::Mismatch`] even though the translation succeeded.
    pub fn new_with_verification(descriptor: Descriptor) -> Self {
        let verifier = descriptor.inverted();
        Self {
            descriptor,
            verifier: Some(verifier),
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn run(&self, document: &Value) -> Result<Value> {
        match document {
            Value::Object(_) => self.translate_one(0, document),
            Value::Array(items) => {
                tracing::info!("Translating {} records", items.len());
                let translated = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| self.translate_one(index, item))
                    .collect::<Result<Vec<_>>>()?;
                tracing::info!("Translated {} records", translated.len());
                Ok(Value::Array(translated))
            }
            other => Err(MapTransError::ValidationError {
                field: "input".to_string(),
                reason: format!("expected a record or an array of records, got {}", describe(other)),
            }),
        }
    }

    fn translate_one(&self, index: usize, item: &Value) -> Result<Value> {
        let Value::Object(source) = item else {
            return Err(MapTransError::ValidationError {
                field: format!("input[{}]", index),
                reason: format!("expected a record, got {}", describe(item)),
            });
        };

        let result = translate(source, Some(&self.descriptor)).inspect_err(|e| {
            tracing::debug!("record {} failed to translate: {}", index, e);
        })?;

        if let Some(verifier) = &self.verifier {
            is_similar(&result, source, verifier)?;
            tracing::debug!("record {} verified", index);
        }

        Ok(Value::Object(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::descriptor::Rule;
    use crate::mappers;
    use serde_json::json;

    fn descriptor() -> Descriptor {
        Descriptor::new()
            .rename("A1", "a1")
            .rule(
                "M",
                Rule::nested_array(Descriptor::new().rename("AA", "a")).target("m"),
            )
    }

    #[test]
    fn test_run_single_record() {
        let engine = TranslationEngine::new(descriptor());
        let output = engine.run(&json!({"A1": "foo", "C1": "x"})).unwrap();
        assert_eq!(output, json!({"a1": "foo"}));
    }

    #[test]
    fn test_run_array_keeps_order() {
        let engine = TranslationEngine::new(descriptor());
        let output = engine
            .run(&json!([{"A1": "first"}, {"A1": "second"}]))
            .unwrap();
        assert_eq!(output, json!([{"a1": "first"}, {"a1": "second"}]));
    }

    #[test]
    fn test_run_rejects_scalars() {
        let engine = TranslationEngine::new(descriptor());
        assert!(engine.run(&json!("text")).is_err());
        assert!(matches!(
            engine.run(&json!([{"A1": "ok"}, 3])),
            Err(MapTransError::ValidationError { ref field, .. }) if field == "input[1]"
        ));
    }

    #[test]
    fn test_verification_passes_for_structural_descriptor() {
        let engine = TranslationEngine::new_with_verification(descriptor());
        let output = engine
            .run(&json!({"A1": "foo", "M": [{"AA": "1"}, {"AA": "2"}]}))
            .unwrap();
        assert_eq!(output, json!({"a1": "foo", "m": [{"a": "1"}, {"a": "2"}]}));
    }

    #[test]
    fn test_verification_reports_trimmed_renames_as_mismatch() {
        let engine = TranslationEngine::new_with_verification(descriptor());
        let err = engine.run(&json!({"A1": " padded "})).unwrap_err();
        assert!(matches!(err, MapTransError::Mismatch { .. }));
    }

    #[test]
    fn test_verification_skips_value_rules() {
        let descriptor = Descriptor::new().rule("n", Rule::custom(mappers::integer).target("N"));
        let engine = TranslationEngine::new_with_verification(descriptor);
        assert_eq!(engine.run(&json!({"n": 7})).unwrap(), json!({"N": "7"}));
    }
}
