pub mod config;
pub mod core;
pub mod domain;
pub mod mappers;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::DescriptorConfig;
pub use crate::core::{coerce_records, is_similar, translate, TranslationEngine};
pub use crate::domain::descriptor::{Descriptor, Entry, Rule, TranslationKind};
pub use crate::domain::model::{Record, Value};
pub use crate::domain::ports::{InsertFn, MapFn, ModFn};
pub use crate::utils::error::{MapTransError, Result};
