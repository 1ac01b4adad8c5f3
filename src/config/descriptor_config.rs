use crate::domain::descriptor::{Descriptor, Entry, Rule, TranslationKind};
use crate::domain::model::Value;
use crate::mappers::{self, MAPPER_NAMES, MODIFIER_NAMES};
use crate::utils::error::{MapTransError, Result};
use crate::utils::validation::{
    validate_known_name, validate_non_empty_string, validate_required_field, validate_unique,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// A descriptor stored as TOML. Fields are arrays of tables, so declaration
/// order survives parsing. Unknown keys are rejected so a misspelled
/// `mapper` cannot silently degrade a rule to a plain rename.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptorConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Rename,
    Custom,
    Nested,
    NestedArray,
    Modify,
    Insert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub source: String,
    pub target: Option<String>,
    pub kind: Option<FieldKind>,
    pub mapper: Option<String>,
    pub modifier: Option<String>,
    #[serde(default)]
    pub mandatory: bool,
    pub default: Option<Value>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl FieldConfig {
    /// Explicit `kind`, otherwise inferred from which keys are set.
    pub fn resolved_kind(&self) -> FieldKind {
        if let Some(kind) = self.kind {
            return kind;
        }
        if self.mapper.is_some() {
            FieldKind::Custom
        } else if self.modifier.is_some() {
            FieldKind::Modify
        } else if self.default.is_some() {
            FieldKind::Insert
        } else if !self.fields.is_empty() {
            FieldKind::Nested
        } else {
            FieldKind::Rename
        }
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        validate_non_empty_string(&format!("{}.source", path), &self.source)?;

        match self.resolved_kind() {
            FieldKind::Rename => {
                let target = validate_required_field(&format!("{}.target", path), &self.target)?;
                validate_non_empty_string(&format!("{}.target", path), target)?;
                if self.mandatory {
                    return Err(MapTransError::ValidationError {
                        field: format!("{}.mandatory", path),
                        reason: "A plain rename cannot be mandatory".to_string(),
                    });
                }
            }
            FieldKind::Custom => {
                let field = format!("{}.mapper", path);
                let mapper = validate_required_field(&field, &self.mapper)?;
                validate_known_name(&field, mapper, MAPPER_NAMES)?;
            }
            FieldKind::Modify => {
                let field = format!("{}.modifier", path);
                let modifier = validate_required_field(&field, &self.modifier)?;
                validate_known_name(&field, modifier, MODIFIER_NAMES)?;
            }
            FieldKind::Insert => {
                validate_required_field(&format!("{}.default", path), &self.default)?;
            }
            FieldKind::Nested | FieldKind::NestedArray => {
                if self.fields.is_empty() {
                    return Err(MapTransError::ValidationError {
                        field: format!("{}.fields", path),
                        reason: "Nested fields need at least one sub-field".to_string(),
                    });
                }
                validate_fields(&format!("{}.fields", path), &self.fields)?;
            }
        }
        Ok(())
    }

    fn build_entry(&self) -> Result<Entry> {
        let kind = match self.resolved_kind() {
            FieldKind::Rename => {
                let target = self.target.clone().unwrap_or_else(|| self.source.clone());
                return Ok(Entry::Rename(target));
            }
            FieldKind::Custom => {
                let name = self.mapper.as_deref().unwrap_or_default();
                TranslationKind::Custom(mappers::mapper(name).ok_or_else(|| unknown("mapper", name))?)
            }
            FieldKind::Modify => {
                let name = self.modifier.as_deref().unwrap_or_default();
                TranslationKind::Modify(
                    mappers::modifier(name).ok_or_else(|| unknown("modifier", name))?,
                )
            }
            FieldKind::Insert => {
                let value = self.default.clone().unwrap_or(Value::Null);
                return Ok(self.finish(Rule::insert(move |_, _, _| Ok(value.clone()))));
            }
            FieldKind::Nested => TranslationKind::Nested(build_descriptor(&self.fields)?),
            FieldKind::NestedArray => {
                TranslationKind::NestedArray(build_descriptor(&self.fields)?)
            }
        };
        Ok(self.finish(Rule::new(kind)))
    }

    fn finish(&self, mut rule: Rule) -> Entry {
        if let Some(target) = &self.target {
            rule = rule.target(target.clone());
        }
        if self.mandatory {
            rule = rule.mandatory();
        }
        Entry::Rule(rule)
    }
}

impl DescriptorConfig {
    /// 從 TOML 檔案載入描述
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapTransError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析描述
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MapTransError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DEFAULT_REGION})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// Validate and turn the configuration into a [`Descriptor`].
    pub fn build(&self) -> Result<Descriptor> {
        self.validate()?;
        let descriptor = build_descriptor(&self.fields)?;
        tracing::debug!(
            "built descriptor '{}' with {} top-level entries",
            self.name.as_deref().unwrap_or("unnamed"),
            descriptor.len()
        );
        Ok(descriptor)
    }
}

impl Validate for DescriptorConfig {
    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(MapTransError::ValidationError {
                field: "fields".to_string(),
                reason: "A descriptor needs at least one field".to_string(),
            });
        }
        validate_fields("fields", &self.fields)
    }
}

fn validate_fields(path: &str, fields: &[FieldConfig]) -> Result<()> {
    validate_unique(path, fields.iter().map(|field| field.source.as_str()))?;
    for (index, field) in fields.iter().enumerate() {
        field.validate_at(&format!("{}[{}]", path, index))?;
    }
    Ok(())
}

fn build_descriptor(fields: &[FieldConfig]) -> Result<Descriptor> {
    let mut descriptor = Descriptor::new();
    for field in fields {
        descriptor.insert(field.source.clone(), field.build_entry()?);
    }
    Ok(descriptor)
}

fn unknown(what: &str, name: &str) -> MapTransError {
    MapTransError::ConfigError {
        message: format!("unknown {} '{}'", what, name),
    }
}
