//! Declarative translation rules.
//!
//! A [`Descriptor`] maps source field names to an [`Entry`]: either a rename
//! shorthand or a full [`Rule`]. Entries keep their declaration order, and the
//! engine evaluates them in that order.
//!
//! ```
//! use maptrans::{Descriptor, Rule, mappers};
//!
//! let descriptor = Descriptor::new()
//!     .rename("A1", "a1")
//!     .rule("uuid", Rule::custom(mappers::uuid).target("UUID").mandatory())
//!     .rule(
//!         "E1",
//!         Rule::nested(Descriptor::new().rename("E11", "e11")).target("e1"),
//!     );
//! assert_eq!(descriptor.len(), 3);
//! ```

use crate::domain::model::{Record, Value};
use crate::domain::ports::{InsertFn, MapFn, ModFn};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What a rule does with its field. Each variant carries the capability its
/// kind needs.
#[derive(Clone)]
pub enum TranslationKind {
    /// Apply a mapper to the value.
    Custom(MapFn),
    /// The value is a record, translated with the sub-descriptor.
    Nested(Descriptor),
    /// The value is a sequence of records, each translated with the sub-descriptor.
    NestedArray(Descriptor),
    /// Let a function rewrite the result using the value.
    Modify(ModFn),
    /// Supply a value when the target is still absent after all fields ran.
    Insert(InsertFn),
}

impl TranslationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Custom(_) => "custom",
            Self::Nested(_) => "nested",
            Self::NestedArray(_) => "nested_array",
            Self::Modify(_) => "modify",
            Self::Insert(_) => "insert",
        }
    }
}

impl fmt::Debug for TranslationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested(sub) => f.debug_tuple("Nested").field(sub).finish(),
            Self::NestedArray(sub) => f.debug_tuple("NestedArray").field(sub).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::Modify(_) => f.write_str("Modify(<fn>)"),
            Self::Insert(_) => f.write_str("Insert(<fn>)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Rule {
    target_name: Option<String>,
    kind: TranslationKind,
    mandatory: bool,
}

impl Rule {
    pub fn new(kind: TranslationKind) -> Self {
        Self {
            target_name: None,
            kind,
            mandatory: false,
        }
    }

    pub fn custom<F>(map_fn: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::new(TranslationKind::Custom(Arc::new(map_fn)))
    }

    pub fn nested(sub_descriptor: Descriptor) -> Self {
        Self::new(TranslationKind::Nested(sub_descriptor))
    }

    pub fn nested_array(sub_descriptor: Descriptor) -> Self {
        Self::new(TranslationKind::NestedArray(sub_descriptor))
    }

    pub fn modify<F>(mod_fn: F) -> Self
    where
        F: Fn(&Record, &mut Record, &Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(TranslationKind::Modify(Arc::new(mod_fn)))
    }

    pub fn insert<F>(insert_fn: F) -> Self
    where
        F: Fn(&Record, &mut Record, &str) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(TranslationKind::Insert(Arc::new(insert_fn)))
    }

    /// Store the output under `name` instead of the source key.
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.target_name = Some(name.into());
        self
    }

    /// Require the source field to be present before anything is translated.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn kind(&self) -> &TranslationKind {
        &self.kind
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// The explicit target name, or `source_key` when none was set.
    pub fn target_name<'a>(&'a self, source_key: &'a str) -> &'a str {
        self.target_name.as_deref().unwrap_or(source_key)
    }
}

#[derive(Clone, Debug)]
pub enum Entry {
    /// Copy a string field (trimmed) under another name.
    Rename(String),
    Rule(Rule),
}

impl From<Rule> for Entry {
    fn from(rule: Rule) -> Self {
        Entry::Rule(rule)
    }
}

impl From<&str> for Entry {
    fn from(target: &str) -> Self {
        Entry::Rename(target.to_string())
    }
}

impl From<String> for Entry {
    fn from(target: String) -> Self {
        Entry::Rename(target)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Descriptor {
    entries: Vec<(String, Entry)>,
    index: HashMap<String, usize>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `source`. A replaced entry keeps its
    /// original position.
    pub fn insert(&mut self, source: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        let source = source.into();
        let entry = entry.into();
        match self.index.get(&source) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, entry)),
            None => {
                self.index.insert(source.clone(), self.entries.len());
                self.entries.push((source, entry));
                None
            }
        }
    }

    pub fn with(mut self, source: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(source, entry);
        self
    }

    pub fn rename(self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.with(source, Entry::Rename(target.into()))
    }

    pub fn rule(self, source: impl Into<String>, rule: Rule) -> Self {
        self.with(source, Entry::Rule(rule))
    }

    pub fn get(&self, source: &str) -> Option<&Entry> {
        self.index
            .get(source)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, source: &str) -> bool {
        self.index.contains_key(source)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries
            .iter()
            .map(|(source, entry)| (source.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptor for checking a translation result against its source with
    /// `is_similar(result, source, ..)`.
    ///
    /// Keys become the target names and targets point back to the source
    /// keys. Only renames and nested rules are carried over; value-mapping
    /// rules have no structural inverse.
    pub fn inverted(&self) -> Descriptor {
        let mut inverted = Descriptor::new();
        for (source, entry) in self.iter() {
            match entry {
                Entry::Rename(target) => {
                    inverted.insert(target.clone(), Entry::Rename(source.to_string()));
                }
                Entry::Rule(rule) => {
                    let kind = match rule.kind() {
                        TranslationKind::Nested(sub) => TranslationKind::Nested(sub.inverted()),
                        TranslationKind::NestedArray(sub) => {
                            TranslationKind::NestedArray(sub.inverted())
                        }
                        _ => continue,
                    };
                    inverted.insert(
                        rule.target_name(source).to_string(),
                        Rule::new(kind).target(source),
                    );
                }
            }
        }
        inverted
    }
}

impl<K, E> FromIterator<(K, E)> for Descriptor
where
    K: Into<String>,
    E: Into<Entry>,
{
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut descriptor = Descriptor::new();
        for (source, entry) in iter {
            descriptor.insert(source, entry);
        }
        descriptor
    }
}
