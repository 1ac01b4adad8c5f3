pub use serde_json::Value;

/// A dynamically typed record: string keys to JSON-like values.
pub type Record = serde_json::Map<String, Value>;
