//! Plated hole records.
//!
//! A plated hole is one of four shapes, selected by the `shape`
//! discriminant (and, for the hybrid hole-with-pad shapes, the secondary
//! `hole_shape` / `pad_shape` tags):
//!
//! | `shape` | Secondary tags | Geometry |
//! |---|---|---|
//! | `circle` | — | `outer_diameter`, `hole_diameter` |
//! | `oval`, `pill` | — | `outer_width`, `outer_height`, `hole_width`, `hole_height` |
//! | `circular_hole_with_rect_pad` | `circle` / `rect` | `hole_diameter`, `rect_pad_width`, `rect_pad_height` |
//! | `pill_hole_with_rect_pad` | `pill` / `rect` | `hole_width`, `hole_height`, `rect_pad_width`, `rect_pad_height` |
//!
//! Each shape exists twice: an *input* type as authored (optional ID,
//! distances as numbers or unit strings) and a *canonical* type (ID always
//! present, distances in millimetres). [`PcbPlatedHoleInput::from_value`]
//! performs the structural checks and `normalize` produces the canonical
//! record.
//!
//! Canonical distances are `f64` and serialise as JSON floats.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{SchemaError, SchemaResult};
use crate::fields::Record;
use crate::ids::{prefixed_id_with_default, IdGenerator};
use crate::layer::LayerRef;
use crate::tags::{
    CircleHoleShape, CircleShape, CircularHoleWithRectPadShape, PillHoleShape,
    PillHoleWithRectPadShape, PlatedHoleType, RectPadShape,
};
use crate::units::{Distance, DistanceInput};

/// Prefix of generated plated hole identifiers.
pub const PLATED_HOLE_ID_PREFIX: &str = "pcb_plated_hole";

const COMMON_FIELDS: &[&str] = &[
    "type",
    "shape",
    "pcb_plated_hole_id",
    "x",
    "y",
    "layers",
    "port_hints",
    "pcb_component_id",
    "pcb_port_id",
    "pcb_group_id",
    "subcircuit_id",
];
const CIRCLE_FIELDS: &[&str] = &["outer_diameter", "hole_diameter"];
const OVAL_FIELDS: &[&str] = &["outer_width", "outer_height", "hole_width", "hole_height"];
const CIRCULAR_HOLE_WITH_RECT_PAD_FIELDS: &[&str] = &[
    "hole_shape",
    "pad_shape",
    "hole_diameter",
    "rect_pad_width",
    "rect_pad_height",
];
const PILL_HOLE_WITH_RECT_PAD_FIELDS: &[&str] = &[
    "hole_shape",
    "pad_shape",
    "hole_width",
    "hole_height",
    "rect_pad_width",
    "rect_pad_height",
];

/// The `shape` discriminant values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatedHoleShape {
    /// Circular hole with a circular annular ring.
    Circle,
    /// Oval hole and pad.
    Oval,
    /// Pill (stadium) hole and pad.
    Pill,
    /// Circular hole with a rectangular pad.
    CircularHoleWithRectPad,
    /// Pill hole with a rectangular pad.
    PillHoleWithRectPad,
}

impl PlatedHoleShape {
    /// Every accepted `shape` string.
    pub const NAMES: &'static [&'static str] = &[
        "circle",
        "oval",
        "pill",
        "circular_hole_with_rect_pad",
        "pill_hole_with_rect_pad",
    ];

    /// Returns the wire name of this shape.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Oval => "oval",
            Self::Pill => "pill",
            Self::CircularHoleWithRectPad => "circular_hole_with_rect_pad",
            Self::PillHoleWithRectPad => "pill_hole_with_rect_pad",
        }
    }

    /// Parses a `shape` value. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "circle" => Some(Self::Circle),
            "oval" => Some(Self::Oval),
            "pill" => Some(Self::Pill),
            "circular_hole_with_rect_pad" => Some(Self::CircularHoleWithRectPad),
            "pill_hole_with_rect_pad" => Some(Self::PillHoleWithRectPad),
            _ => None,
        }
    }

    const fn variant_fields(self) -> &'static [&'static str] {
        match self {
            Self::Circle => CIRCLE_FIELDS,
            Self::Oval | Self::Pill => OVAL_FIELDS,
            Self::CircularHoleWithRectPad => CIRCULAR_HOLE_WITH_RECT_PAD_FIELDS,
            Self::PillHoleWithRectPad => PILL_HOLE_WITH_RECT_PAD_FIELDS,
        }
    }
}

impl fmt::Display for PlatedHoleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `shape` of the oval variant, which accepts two spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvalShape {
    /// `"oval"`
    #[default]
    Oval,
    /// `"pill"`
    Pill,
}

impl From<OvalShape> for PlatedHoleShape {
    fn from(shape: OvalShape) -> Self {
        match shape {
            OvalShape::Oval => Self::Oval,
            OvalShape::Pill => Self::Pill,
        }
    }
}

// =============================================================================
// Canonical records
// =============================================================================

/// Fields shared by every plated hole shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatedHoleCommon {
    /// Unique identifier, always present and non-empty once validated.
    #[serde(deserialize_with = "crate::fields::non_empty_id")]
    pub pcb_plated_hole_id: String,

    /// X position in mm.
    pub x: Distance,

    /// Y position in mm.
    pub y: Distance,

    /// Layers the hole is plated on, in stackup order.
    pub layers: Vec<LayerRef>,

    /// Free-text hints used to match the hole to a component port.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub port_hints: Option<Vec<String>>,

    /// Owning PCB component (not checked for existence).
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pcb_component_id: Option<String>,

    /// Connected PCB port (not checked for existence).
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pcb_port_id: Option<String>,

    /// Grouping identifier.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pcb_group_id: Option<String>,

    /// Subcircuit identifier.
    #[serde(
        default,
        deserialize_with = "crate::fields::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub subcircuit_id: Option<String>,
}

/// A circular plated hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPlatedHoleCircle {
    /// Always `"pcb_plated_hole"`.
    #[serde(rename = "type")]
    pub element_type: PlatedHoleType,
    /// Always `"circle"`.
    pub shape: CircleShape,
    /// Copper ring outer diameter in mm.
    pub outer_diameter: Distance,
    /// Drill diameter in mm.
    pub hole_diameter: Distance,
    /// Shared fields.
    #[serde(flatten)]
    pub common: PlatedHoleCommon,
}

/// An oval or pill-shaped plated hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPlatedHoleOval {
    /// Always `"pcb_plated_hole"`.
    #[serde(rename = "type")]
    pub element_type: PlatedHoleType,
    /// `"oval"` or `"pill"`.
    pub shape: OvalShape,
    /// Copper outline width in mm.
    pub outer_width: Distance,
    /// Copper outline height in mm.
    pub outer_height: Distance,
    /// Drill width in mm.
    pub hole_width: Distance,
    /// Drill height in mm.
    pub hole_height: Distance,
    /// Shared fields.
    #[serde(flatten)]
    pub common: PlatedHoleCommon,
}

/// A circular hole inside a rectangular pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbHoleCircularWithRectPad {
    /// Always `"pcb_plated_hole"`.
    #[serde(rename = "type")]
    pub element_type: PlatedHoleType,
    /// Always `"circular_hole_with_rect_pad"`.
    pub shape: CircularHoleWithRectPadShape,
    /// Always `"circle"`.
    pub hole_shape: CircleHoleShape,
    /// Always `"rect"`.
    pub pad_shape: RectPadShape,
    /// Drill diameter in mm.
    pub hole_diameter: Distance,
    /// Pad width in mm.
    pub rect_pad_width: Distance,
    /// Pad height in mm.
    pub rect_pad_height: Distance,
    /// Shared fields.
    #[serde(flatten)]
    pub common: PlatedHoleCommon,
}

/// A pill hole inside a rectangular pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbHolePillWithRectPad {
    /// Always `"pcb_plated_hole"`.
    #[serde(rename = "type")]
    pub element_type: PlatedHoleType,
    /// Always `"pill_hole_with_rect_pad"`.
    pub shape: PillHoleWithRectPadShape,
    /// Always `"pill"`.
    pub hole_shape: PillHoleShape,
    /// Always `"rect"`.
    pub pad_shape: RectPadShape,
    /// Drill width in mm.
    pub hole_width: Distance,
    /// Drill height in mm.
    pub hole_height: Distance,
    /// Pad width in mm.
    pub rect_pad_width: Distance,
    /// Pad height in mm.
    pub rect_pad_height: Distance,
    /// Shared fields.
    #[serde(flatten)]
    pub common: PlatedHoleCommon,
}

/// A validated plated hole of any shape.
///
/// Serialises to the flat wire record. Deserialising reads `shape` first and
/// then decodes exactly that variant, requiring the canonical form (ID
/// present, distances as numbers).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PcbPlatedHole {
    /// `shape = "circle"`.
    Circle(PcbPlatedHoleCircle),
    /// `shape = "oval" | "pill"`.
    Oval(PcbPlatedHoleOval),
    /// `shape = "circular_hole_with_rect_pad"`.
    CircularHoleWithRectPad(PcbHoleCircularWithRectPad),
    /// `shape = "pill_hole_with_rect_pad"`.
    PillHoleWithRectPad(PcbHolePillWithRectPad),
}

impl PcbPlatedHole {
    /// Returns the shape discriminant.
    #[must_use]
    pub fn shape(&self) -> PlatedHoleShape {
        match self {
            Self::Circle(_) => PlatedHoleShape::Circle,
            Self::Oval(hole) => hole.shape.into(),
            Self::CircularHoleWithRectPad(_) => PlatedHoleShape::CircularHoleWithRectPad,
            Self::PillHoleWithRectPad(_) => PlatedHoleShape::PillHoleWithRectPad,
        }
    }

    /// Returns the fields shared by every shape.
    #[must_use]
    pub const fn common(&self) -> &PlatedHoleCommon {
        match self {
            Self::Circle(hole) => &hole.common,
            Self::Oval(hole) => &hole.common,
            Self::CircularHoleWithRectPad(hole) => &hole.common,
            Self::PillHoleWithRectPad(hole) => &hole.common,
        }
    }

    /// Returns the hole identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.common().pcb_plated_hole_id
    }

    /// Returns the position in mm.
    #[must_use]
    pub const fn position(&self) -> (Distance, Distance) {
        let common = self.common();
        (common.x, common.y)
    }

    /// Returns the plated layers in stackup order.
    #[must_use]
    pub fn layers(&self) -> &[LayerRef] {
        &self.common().layers
    }
}

impl<'de> Deserialize<'de> for PcbPlatedHole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let shape = value
            .get("shape")
            .ok_or_else(|| D::Error::missing_field("shape"))?
            .as_str()
            .ok_or_else(|| D::Error::custom("plated hole shape must be a string"))?;
        let kind = PlatedHoleShape::parse(shape)
            .ok_or_else(|| D::Error::unknown_variant(shape, PlatedHoleShape::NAMES))?;

        let hole = match kind {
            PlatedHoleShape::Circle => serde_json::from_value(value).map(Self::Circle),
            PlatedHoleShape::Oval | PlatedHoleShape::Pill => {
                serde_json::from_value(value).map(Self::Oval)
            }
            PlatedHoleShape::CircularHoleWithRectPad => {
                serde_json::from_value(value).map(Self::CircularHoleWithRectPad)
            }
            PlatedHoleShape::PillHoleWithRectPad => {
                serde_json::from_value(value).map(Self::PillHoleWithRectPad)
            }
        };
        hole.map_err(D::Error::custom)
    }
}

// =============================================================================
// Input records
// =============================================================================

/// Shared fields as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatedHoleCommonInput {
    /// Explicit identifier; generated when `None` or empty.
    pub pcb_plated_hole_id: Option<String>,
    /// X position.
    pub x: DistanceInput,
    /// Y position.
    pub y: DistanceInput,
    /// Plated layers in stackup order.
    pub layers: Vec<LayerRef>,
    /// Port matching hints.
    pub port_hints: Option<Vec<String>>,
    /// Owning PCB component.
    pub pcb_component_id: Option<String>,
    /// Connected PCB port.
    pub pcb_port_id: Option<String>,
    /// Grouping identifier.
    pub pcb_group_id: Option<String>,
    /// Subcircuit identifier.
    pub subcircuit_id: Option<String>,
}

impl PlatedHoleCommonInput {
    /// Creates shared fields with only the required values set.
    #[must_use]
    pub fn new(x: impl Into<DistanceInput>, y: impl Into<DistanceInput>, layers: Vec<LayerRef>) -> Self {
        Self {
            pcb_plated_hole_id: None,
            x: x.into(),
            y: y.into(),
            layers,
            port_hints: None,
            pcb_component_id: None,
            pcb_port_id: None,
            pcb_group_id: None,
            subcircuit_id: None,
        }
    }

    /// Sets an explicit identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.pcb_plated_hole_id = Some(id.into());
        self
    }

    fn from_record(record: &Record<'_>) -> SchemaResult<Self> {
        Ok(Self {
            x: record.required_distance("x")?,
            y: record.required_distance("y")?,
            layers: record.required_layers("layers")?,
            port_hints: record.optional_string_list("port_hints")?,
            pcb_component_id: record.optional_string("pcb_component_id")?,
            pcb_port_id: record.optional_string("pcb_port_id")?,
            pcb_group_id: record.optional_string("pcb_group_id")?,
            subcircuit_id: record.optional_string("subcircuit_id")?,
            pcb_plated_hole_id: record.optional_string("pcb_plated_hole_id")?,
        })
    }

    /// The identifier is resolved last so a rejected record never consumes
    /// generator state.
    fn normalize(self, ids: &dyn IdGenerator) -> SchemaResult<PlatedHoleCommon> {
        let x = distance("x", &self.x)?;
        let y = distance("y", &self.y)?;
        let pcb_plated_hole_id = prefixed_id_with_default(
            PLATED_HOLE_ID_PREFIX,
            self.pcb_plated_hole_id.as_deref(),
            ids,
        );
        Ok(PlatedHoleCommon {
            pcb_plated_hole_id,
            x,
            y,
            layers: self.layers,
            port_hints: self.port_hints,
            pcb_component_id: self.pcb_component_id,
            pcb_port_id: self.pcb_port_id,
            pcb_group_id: self.pcb_group_id,
            subcircuit_id: self.subcircuit_id,
        })
    }
}

/// A circular plated hole as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct PcbPlatedHoleCircleInput {
    /// Copper ring outer diameter.
    pub outer_diameter: DistanceInput,
    /// Drill diameter.
    pub hole_diameter: DistanceInput,
    /// Shared fields.
    pub common: PlatedHoleCommonInput,
}

impl PcbPlatedHoleCircleInput {
    /// Produces the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDistanceFormat`] for any distance that
    /// cannot be normalised.
    pub fn normalize(self, ids: &dyn IdGenerator) -> SchemaResult<PcbPlatedHoleCircle> {
        Ok(PcbPlatedHoleCircle {
            element_type: PlatedHoleType,
            shape: CircleShape,
            outer_diameter: distance("outer_diameter", &self.outer_diameter)?,
            hole_diameter: distance("hole_diameter", &self.hole_diameter)?,
            common: self.common.normalize(ids)?,
        })
    }
}

/// An oval or pill plated hole as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct PcbPlatedHoleOvalInput {
    /// Which spelling of the shape was used.
    pub shape: OvalShape,
    /// Copper outline width.
    pub outer_width: DistanceInput,
    /// Copper outline height.
    pub outer_height: DistanceInput,
    /// Drill width.
    pub hole_width: DistanceInput,
    /// Drill height.
    pub hole_height: DistanceInput,
    /// Shared fields.
    pub common: PlatedHoleCommonInput,
}

impl PcbPlatedHoleOvalInput {
    /// Produces the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDistanceFormat`] for any distance that
    /// cannot be normalised.
    pub fn normalize(self, ids: &dyn IdGenerator) -> SchemaResult<PcbPlatedHoleOval> {
        Ok(PcbPlatedHoleOval {
            element_type: PlatedHoleType,
            shape: self.shape,
            outer_width: distance("outer_width", &self.outer_width)?,
            outer_height: distance("outer_height", &self.outer_height)?,
            hole_width: distance("hole_width", &self.hole_width)?,
            hole_height: distance("hole_height", &self.hole_height)?,
            common: self.common.normalize(ids)?,
        })
    }
}

/// A circular hole with a rectangular pad as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct PcbHoleCircularWithRectPadInput {
    /// Drill diameter.
    pub hole_diameter: DistanceInput,
    /// Pad width.
    pub rect_pad_width: DistanceInput,
    /// Pad height.
    pub rect_pad_height: DistanceInput,
    /// Shared fields.
    pub common: PlatedHoleCommonInput,
}

impl PcbHoleCircularWithRectPadInput {
    /// Produces the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDistanceFormat`] for any distance that
    /// cannot be normalised.
    pub fn normalize(self, ids: &dyn IdGenerator) -> SchemaResult<PcbHoleCircularWithRectPad> {
        Ok(PcbHoleCircularWithRectPad {
            element_type: PlatedHoleType,
            shape: CircularHoleWithRectPadShape,
            hole_shape: CircleHoleShape,
            pad_shape: RectPadShape,
            hole_diameter: distance("hole_diameter", &self.hole_diameter)?,
            rect_pad_width: distance("rect_pad_width", &self.rect_pad_width)?,
            rect_pad_height: distance("rect_pad_height", &self.rect_pad_height)?,
            common: self.common.normalize(ids)?,
        })
    }
}

/// A pill hole with a rectangular pad as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct PcbHolePillWithRectPadInput {
    /// Drill width.
    pub hole_width: DistanceInput,
    /// Drill height.
    pub hole_height: DistanceInput,
    /// Pad width.
    pub rect_pad_width: DistanceInput,
    /// Pad height.
    pub rect_pad_height: DistanceInput,
    /// Shared fields.
    pub common: PlatedHoleCommonInput,
}

impl PcbHolePillWithRectPadInput {
    /// Produces the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDistanceFormat`] for any distance that
    /// cannot be normalised.
    pub fn normalize(self, ids: &dyn IdGenerator) -> SchemaResult<PcbHolePillWithRectPad> {
        Ok(PcbHolePillWithRectPad {
            element_type: PlatedHoleType,
            shape: PillHoleWithRectPadShape,
            hole_shape: PillHoleShape,
            pad_shape: RectPadShape,
            hole_width: distance("hole_width", &self.hole_width)?,
            hole_height: distance("hole_height", &self.hole_height)?,
            rect_pad_width: distance("rect_pad_width", &self.rect_pad_width)?,
            rect_pad_height: distance("rect_pad_height", &self.rect_pad_height)?,
            common: self.common.normalize(ids)?,
        })
    }
}

/// A plated hole of any shape as authored.
#[derive(Debug, Clone, PartialEq)]
pub enum PcbPlatedHoleInput {
    /// `shape = "circle"`.
    Circle(PcbPlatedHoleCircleInput),
    /// `shape = "oval" | "pill"`.
    Oval(PcbPlatedHoleOvalInput),
    /// `shape = "circular_hole_with_rect_pad"`.
    CircularHoleWithRectPad(PcbHoleCircularWithRectPadInput),
    /// `shape = "pill_hole_with_rect_pad"`.
    PillHoleWithRectPad(PcbHolePillWithRectPadInput),
}

impl PcbPlatedHoleInput {
    /// Structurally validates a JSON record.
    ///
    /// Dispatch is discriminant-first: `type` is checked, then `shape`
    /// selects exactly one variant, then the hybrid variants' secondary tags
    /// are checked, and only then are that variant's fields read. Unknown
    /// keys are ignored.
    ///
    /// Distance strings are not parsed here; see [`Self::normalize`].
    ///
    /// # Errors
    ///
    /// - [`SchemaError::WrongType`] if the record is not an object
    /// - [`SchemaError::NotAPlatedHole`] if `type` is not `"pcb_plated_hole"`
    /// - [`SchemaError::UnknownShape`] if `shape` names no variant
    /// - [`SchemaError::VariantMismatch`] if a secondary tag contradicts `shape`
    /// - [`SchemaError::MissingField`] / [`SchemaError::WrongType`] for
    ///   absent or mistyped fields
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let record = Record::new(value)?;

        match record.get("type") {
            Some(Value::String(t)) if t == PlatedHoleType::VALUE => {}
            other => return Err(SchemaError::not_a_plated_hole(other)),
        }

        let shape_name = record.required_str("shape")?;
        let shape =
            PlatedHoleShape::parse(shape_name).ok_or_else(|| SchemaError::unknown_shape(shape_name))?;
        trace!(%shape, "Selected plated hole variant");

        let input = match shape {
            PlatedHoleShape::Circle => Self::Circle(PcbPlatedHoleCircleInput {
                outer_diameter: record.required_distance("outer_diameter")?,
                hole_diameter: record.required_distance("hole_diameter")?,
                common: PlatedHoleCommonInput::from_record(&record)?,
            }),
            PlatedHoleShape::Oval | PlatedHoleShape::Pill => {
                Self::Oval(PcbPlatedHoleOvalInput {
                    shape: if shape == PlatedHoleShape::Pill {
                        OvalShape::Pill
                    } else {
                        OvalShape::Oval
                    },
                    outer_width: record.required_distance("outer_width")?,
                    outer_height: record.required_distance("outer_height")?,
                    hole_width: record.required_distance("hole_width")?,
                    hole_height: record.required_distance("hole_height")?,
                    common: PlatedHoleCommonInput::from_record(&record)?,
                })
            }
            PlatedHoleShape::CircularHoleWithRectPad => {
                expect_secondary_tag(&record, shape, "hole_shape", CircleHoleShape::VALUE)?;
                expect_secondary_tag(&record, shape, "pad_shape", RectPadShape::VALUE)?;
                Self::CircularHoleWithRectPad(PcbHoleCircularWithRectPadInput {
                    hole_diameter: record.required_distance("hole_diameter")?,
                    rect_pad_width: record.required_distance("rect_pad_width")?,
                    rect_pad_height: record.required_distance("rect_pad_height")?,
                    common: PlatedHoleCommonInput::from_record(&record)?,
                })
            }
            PlatedHoleShape::PillHoleWithRectPad => {
                expect_secondary_tag(&record, shape, "hole_shape", PillHoleShape::VALUE)?;
                expect_secondary_tag(&record, shape, "pad_shape", RectPadShape::VALUE)?;
                Self::PillHoleWithRectPad(PcbHolePillWithRectPadInput {
                    hole_width: record.required_distance("hole_width")?,
                    hole_height: record.required_distance("hole_height")?,
                    rect_pad_width: record.required_distance("rect_pad_width")?,
                    rect_pad_height: record.required_distance("rect_pad_height")?,
                    common: PlatedHoleCommonInput::from_record(&record)?,
                })
            }
        };

        record.log_ignored_fields(PlatedHoleType::VALUE, &[COMMON_FIELDS, shape.variant_fields()]);
        Ok(input)
    }

    /// Returns the shape discriminant.
    #[must_use]
    pub fn shape(&self) -> PlatedHoleShape {
        match self {
            Self::Circle(_) => PlatedHoleShape::Circle,
            Self::Oval(hole) => hole.shape.into(),
            Self::CircularHoleWithRectPad(_) => PlatedHoleShape::CircularHoleWithRectPad,
            Self::PillHoleWithRectPad(_) => PlatedHoleShape::PillHoleWithRectPad,
        }
    }

    /// Normalises distances and resolves the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDistanceFormat`] naming the first
    /// distance that cannot be normalised.
    pub fn normalize(self, ids: &dyn IdGenerator) -> SchemaResult<PcbPlatedHole> {
        Ok(match self {
            Self::Circle(hole) => PcbPlatedHole::Circle(hole.normalize(ids)?),
            Self::Oval(hole) => PcbPlatedHole::Oval(hole.normalize(ids)?),
            Self::CircularHoleWithRectPad(hole) => {
                PcbPlatedHole::CircularHoleWithRectPad(hole.normalize(ids)?)
            }
            Self::PillHoleWithRectPad(hole) => {
                PcbPlatedHole::PillHoleWithRectPad(hole.normalize(ids)?)
            }
        })
    }
}

/// Validates and normalises a plated hole record in one step.
///
/// # Errors
///
/// See [`PcbPlatedHoleInput::from_value`] and [`PcbPlatedHoleInput::normalize`].
///
/// # Examples
///
/// ```
/// use pcb_schema::ids::CounterIdGenerator;
/// use pcb_schema::pcb::{parse_plated_hole, PlatedHoleShape};
/// use serde_json::json;
///
/// let ids = CounterIdGenerator::new();
/// let hole = parse_plated_hole(
///     &json!({
///         "type": "pcb_plated_hole",
///         "shape": "circle",
///         "outer_diameter": 2,
///         "hole_diameter": "1mm",
///         "x": 0,
///         "y": "0.1in",
///         "layers": ["top", "bottom"]
///     }),
///     &ids,
/// )
/// .unwrap();
///
/// assert_eq!(hole.shape(), PlatedHoleShape::Circle);
/// assert_eq!(hole.id(), "pcb_plated_hole_0");
/// ```
pub fn parse_plated_hole(value: &Value, ids: &dyn IdGenerator) -> SchemaResult<PcbPlatedHole> {
    PcbPlatedHoleInput::from_value(value)?.normalize(ids)
}

fn expect_secondary_tag(
    record: &Record<'_>,
    shape: PlatedHoleShape,
    field: &str,
    expected: &str,
) -> SchemaResult<()> {
    let value = record.required(field)?;
    match value.as_str() {
        Some(found) if found == expected => Ok(()),
        Some(_) => Err(SchemaError::variant_mismatch(
            shape.as_str(),
            field,
            expected,
            value,
        )),
        None => Err(SchemaError::wrong_type(field, "string", value)),
    }
}

fn distance(field: &str, input: &DistanceInput) -> SchemaResult<Distance> {
    input
        .normalize()
        .map_err(|source| SchemaError::invalid_distance(field, source))
}
