//! Record normalisation at the response boundary.
//!
//! The API is not consistent about key names for the same concept. Each record type
//! declares an ordered alias table; [`decode`] resolves it once, drops top-level
//! nulls, then hands a canonical object to serde. When resolving an alias, an empty
//! string, object or array counts as absent, just like null.

use crate::error::V7Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Canonical key plus the keys accepted for it, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct KeyAliases {
    pub canonical: &'static str,
    pub accepted: &'static [&'static str],
}

impl KeyAliases {
    pub const fn new(canonical: &'static str, accepted: &'static [&'static str]) -> Self {
        Self {
            canonical,
            accepted,
        }
    }
}

/// Types decoded from a raw API record.
pub trait FromRecord: Sized {
    fn from_record(record: Value) -> Result<Self, V7Error>;
}

/// Resolve aliases and drop top-level nulls.
///
/// Aliases are resolved against the record as received, so two canonical keys may
/// alias each other (`id` / `request_id`). Missing, null or empty values fall
/// through to the next accepted key; when every accepted key is blank the canonical
/// key is removed so the field takes its default. Non-object records are returned
/// unchanged.
pub fn normalize_record(record: Value, aliases: &[KeyAliases]) -> Value {
    let Value::Object(mut map) = record else {
        return record;
    };
    map.retain(|_, value| !value.is_null());

    let resolved: Vec<(&str, Option<Value>)> = aliases
        .iter()
        .map(|alias| {
            let value = alias
                .accepted
                .iter()
                .find_map(|key| map.get(*key).filter(|v| !is_blank(v)).cloned());
            (alias.canonical, value)
        })
        .collect();
    for (canonical, value) in resolved {
        match value {
            Some(value) => map.insert(canonical.to_string(), value),
            None => map.remove(canonical),
        };
    }
    Value::Object(map)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Normalise then deserialise. `kind` names the record type in error messages.
pub fn decode<T: DeserializeOwned>(
    record: Value,
    aliases: &[KeyAliases],
    kind: &str,
) -> Result<T, V7Error> {
    serde_json::from_value(normalize_record(record, aliases))
        .map_err(|e| V7Error::Transport(format!("Unexpected {} record: {}", kind, e)))
}

/// Treat an explicit JSON null as the type's default. For nested records, which
/// [`normalize_record`] does not reach.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `data` array of a list response; missing or malformed yields an empty list.
pub fn data_items(response: &Value) -> Vec<Value> {
    response
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
