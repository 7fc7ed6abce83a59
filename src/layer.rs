//! Board layer references.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};

/// A reference to a copper layer of the board.
///
/// Authored either as a bare name (`"top"`) or as an object with a `name`
/// field (`{"name": "top"}`). Always serialises as the bare name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "LayerRefRepr")]
pub enum LayerRef {
    /// Top copper layer.
    Top,
    /// Bottom copper layer.
    Bottom,
    /// Inner copper layer 1.
    Inner1,
    /// Inner copper layer 2.
    Inner2,
    /// Inner copper layer 3.
    Inner3,
    /// Inner copper layer 4.
    Inner4,
    /// Inner copper layer 5.
    Inner5,
    /// Inner copper layer 6.
    Inner6,
}

impl LayerRef {
    /// All layers from top to bottom of the stackup.
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Inner1,
        Self::Inner2,
        Self::Inner3,
        Self::Inner4,
        Self::Inner5,
        Self::Inner6,
        Self::Bottom,
    ];

    /// Human-readable list of accepted names, used in diagnostics.
    pub(crate) const EXPECTED: &'static str = "layer name (top, bottom, inner1..inner6)";

    /// Returns the layer name string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Inner1 => "inner1",
            Self::Inner2 => "inner2",
            Self::Inner3 => "inner3",
            Self::Inner4 => "inner4",
            Self::Inner5 => "inner5",
            Self::Inner6 => "inner6",
        }
    }

    /// Parses a layer from its name string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "inner1" => Some(Self::Inner1),
            "inner2" => Some(Self::Inner2),
            "inner3" => Some(Self::Inner3),
            "inner4" => Some(Self::Inner4),
            "inner5" => Some(Self::Inner5),
            "inner6" => Some(Self::Inner6),
            _ => None,
        }
    }

    /// Validates an authored layer reference.
    ///
    /// `field` names the location for diagnostics, e.g. `layers[0]`.
    pub(crate) fn from_value(field: &str, value: &Value) -> SchemaResult<Self> {
        let name = match value {
            Value::String(name) => Some(name.as_str()),
            Value::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        };
        name.and_then(Self::parse)
            .ok_or_else(|| SchemaError::wrong_type(field, Self::EXPECTED, value))
    }
}

impl fmt::Display for LayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayerRefRepr {
    Name(String),
    Named { name: String },
}

impl TryFrom<LayerRefRepr> for LayerRef {
    type Error = String;

    fn try_from(repr: LayerRefRepr) -> Result<Self, Self::Error> {
        let (LayerRefRepr::Name(name) | LayerRefRepr::Named { name }) = repr;
        Self::parse(&name).ok_or_else(|| format!("unknown layer \"{name}\""))
    }
}
