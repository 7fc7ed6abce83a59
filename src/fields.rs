//! Field access helpers for loosely-typed JSON records.
//!
//! These are the building blocks of the per-record validators: each one
//! looks up a single field and turns an absent or mistyped value into the
//! matching [`SchemaError`]. The serde helpers at the bottom apply the same
//! rules when a canonical record is deserialised directly.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::layer::LayerRef;
use crate::units::DistanceInput;

/// A JSON object being validated.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    /// Wraps a JSON value, which must be an object.
    pub(crate) fn new(value: &'a Value) -> SchemaResult<Self> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| SchemaError::wrong_type("$", "object", value))
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub(crate) fn required(&self, key: &str) -> SchemaResult<&'a Value> {
        self.get(key).ok_or_else(|| SchemaError::missing_field(key))
    }

    pub(crate) fn required_str(&self, key: &str) -> SchemaResult<&'a str> {
        let value = self.required(key)?;
        value
            .as_str()
            .ok_or_else(|| SchemaError::wrong_type(key, "string", value))
    }

    pub(crate) fn optional_str(&self, key: &str) -> SchemaResult<Option<&'a str>> {
        self.get(key)
            .map(|value| {
                value
                    .as_str()
                    .ok_or_else(|| SchemaError::wrong_type(key, "string", value))
            })
            .transpose()
    }

    pub(crate) fn optional_string(&self, key: &str) -> SchemaResult<Option<String>> {
        Ok(self.optional_str(key)?.map(str::to_string))
    }

    pub(crate) fn optional_bool(&self, key: &str) -> SchemaResult<Option<bool>> {
        self.get(key)
            .map(|value| {
                value
                    .as_bool()
                    .ok_or_else(|| SchemaError::wrong_type(key, "boolean", value))
            })
            .transpose()
    }

    pub(crate) fn optional_string_list(&self, key: &str) -> SchemaResult<Option<Vec<String>>> {
        self.get(key)
            .map(|value| string_list(key, value))
            .transpose()
    }

    /// Reads a distance without normalising it.
    pub(crate) fn required_distance(&self, key: &str) -> SchemaResult<DistanceInput> {
        match self.required(key)? {
            value @ Value::Number(n) => n
                .as_f64()
                .map(DistanceInput::Number)
                .ok_or_else(|| SchemaError::wrong_type(key, "finite number", value)),
            Value::String(s) => Ok(DistanceInput::Text(s.clone())),
            other => Err(SchemaError::wrong_type(
                key,
                "number or distance string",
                other,
            )),
        }
    }

    /// Reads an ordered list of layer references.
    pub(crate) fn required_layers(&self, key: &str) -> SchemaResult<Vec<LayerRef>> {
        let value = self.required(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| SchemaError::wrong_type(key, "array of layers", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| LayerRef::from_value(&format!("{key}[{i}]"), item))
            .collect()
    }

    /// Logs (but otherwise ignores) keys no schema field consumes.
    pub(crate) fn log_ignored_fields(&self, record_kind: &str, known: &[&[&str]]) {
        for key in self.map.keys() {
            if !known.iter().any(|set| set.contains(&key.as_str())) {
                debug!(record = record_kind, field = %key, "Ignoring unknown field");
            }
        }
    }
}

/// Validates an array of strings; `key` names the field for diagnostics.
pub(crate) fn string_list(key: &str, value: &Value) -> SchemaResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::wrong_type(key, "array of strings", value))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::wrong_type(format!("{key}[{i}]"), "string", item))
        })
        .collect()
}

// =============================================================================
// Serde helpers for canonical records
// =============================================================================

/// Deserialises an optional field that, when present, must hold a value.
///
/// Used with `#[serde(default, deserialize_with = "...")]`: an absent key
/// stays `None`, while an explicit `null` is rejected like any other
/// mistyped value.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Deserialises a resolved identifier, which is never empty.
pub(crate) fn non_empty_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    if id.is_empty() {
        return Err(D::Error::invalid_value(
            Unexpected::Str(&id),
            &"a non-empty identifier",
        ));
    }
    Ok(id)
}
