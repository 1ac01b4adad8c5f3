pub mod coercion;
pub mod engine;
pub mod similarity;
pub mod translate;

pub use crate::domain::descriptor::{Descriptor, Entry, Rule, TranslationKind};
pub use crate::domain::model::{Record, Value};
pub use crate::utils::error::Result;
pub use coercion::{coerce_records, CoercionError};
pub use engine::TranslationEngine;
pub use similarity::is_similar;
pub use translate::translate;
