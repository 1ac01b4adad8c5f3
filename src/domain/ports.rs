use crate::domain::model::{Record, Value};
use crate::utils::error::Result;
use std::sync::Arc;

/// Pure value-to-value conversion used by `Custom` rules. A failure's message
/// becomes the reason of an `InvalidProperty` error.
pub type MapFn = Arc<dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync>;

/// Receives the source record, the result built so far and the field value.
/// May write any key into the result.
pub type ModFn = Arc<dyn Fn(&Record, &mut Record, &Value) -> anyhow::Result<()> + Send + Sync>;

/// Receives the source record, the result built so far and the source key of
/// the rule. The returned value is stored under the rule's target name.
pub type InsertFn = Arc<dyn Fn(&Record, &mut Record, &str) -> Result<Value> + Send + Sync>;
