// Domain layer: record model, descriptor model and the capability signatures
// the engine consumes.

pub mod descriptor;
pub mod model;
pub mod ports;
