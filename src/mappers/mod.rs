//! Built-in value mappers and modify functions.
//!
//! Every mapper has the [`MapFn`] shape and can be used directly with
//! `Rule::custom`, or looked up by name when descriptors come from
//! configuration files.

pub mod identifiers;
pub mod modifiers;
pub mod network;
pub mod scalars;
pub mod strings;

pub use identifiers::{identifier, uuid};
pub use modifiers::flatten;
pub use network::{cidr, ip};
pub use scalars::{bool_to_string, boolean, integer};
pub use strings::{id, lower, string, string_array, upper};

use crate::domain::ports::{MapFn, ModFn};
use std::sync::Arc;

/// Names accepted by [`mapper`], in documentation order.
pub const MAPPER_NAMES: &[&str] = &[
    "id",
    "string",
    "lower",
    "upper",
    "identifier",
    "ip",
    "cidr",
    "bool",
    "bool_to_string",
    "integer",
    "uuid",
    "string_array",
];

pub const MODIFIER_NAMES: &[&str] = &["flatten"];

pub fn mapper(name: &str) -> Option<MapFn> {
    let mapper: MapFn = match name {
        "id" => Arc::new(id),
        "string" => Arc::new(string),
        "lower" => Arc::new(lower),
        "upper" => Arc::new(upper),
        "identifier" => Arc::new(identifier),
        "ip" => Arc::new(ip),
        "cidr" => Arc::new(cidr),
        "bool" => Arc::new(boolean),
        "bool_to_string" => Arc::new(bool_to_string),
        "integer" => Arc::new(integer),
        "uuid" => Arc::new(uuid),
        "string_array" => Arc::new(string_array),
        _ => return None,
    };
    Some(mapper)
}

pub fn modifier(name: &str) -> Option<ModFn> {
    match name {
        "flatten" => Some(Arc::new(flatten)),
        _ => None,
    }
}
