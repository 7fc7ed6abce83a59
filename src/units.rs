//! Distance normalisation.
//!
//! Every geometric field accepts either a bare number, which is already in
//! millimetres, or a string with a length unit suffix such as `"0.5mm"`,
//! `"40mil"` or `"0.1in"`. Normalisation turns both forms into a plain
//! millimetre value.
//!
//! # Recognised Units
//!
//! | Suffix | Unit | Millimetres |
//! |---|---|---|
//! | `nm` | nanometre | 0.000001 |
//! | `um`, `µm` | micrometre | 0.001 |
//! | `mm` | millimetre | 1 |
//! | `cm` | centimetre | 10 |
//! | `m` | metre | 1000 |
//! | `mil` | thousandth of an inch | 0.0254 |
//! | `in`, `inch` | inch | 25.4 |
//!
//! Suffixes are case-sensitive. A numeric string without a suffix is taken
//! to be millimetres already.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A normalised distance in millimetres.
pub type Distance = f64;

/// Length units accepted in distance strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Nanometre.
    Nanometre,
    /// Micrometre.
    Micrometre,
    /// Millimetre (the canonical unit).
    Millimetre,
    /// Centimetre.
    Centimetre,
    /// Metre.
    Metre,
    /// Thousandth of an inch.
    Mil,
    /// Inch.
    Inch,
}

impl LengthUnit {
    /// The unit every normalised distance is expressed in.
    pub const CANONICAL: Self = Self::Millimetre;

    /// Parses a unit suffix.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nm" => Some(Self::Nanometre),
            "um" | "µm" | "μm" => Some(Self::Micrometre),
            "mm" => Some(Self::Millimetre),
            "cm" => Some(Self::Centimetre),
            "m" => Some(Self::Metre),
            "mil" | "mils" => Some(Self::Mil),
            "in" | "inch" => Some(Self::Inch),
            _ => None,
        }
    }

    /// Returns the preferred suffix for this unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nanometre => "nm",
            Self::Micrometre => "um",
            Self::Millimetre => "mm",
            Self::Centimetre => "cm",
            Self::Metre => "m",
            Self::Mil => "mil",
            Self::Inch => "in",
        }
    }

    /// Returns how many millimetres one of this unit is.
    #[must_use]
    pub const fn millimetres(&self) -> f64 {
        match self {
            Self::Nanometre => 1e-6,
            Self::Micrometre => 1e-3,
            Self::Millimetre => 1.0,
            Self::Centimetre => 10.0,
            Self::Metre => 1000.0,
            Self::Mil => 0.0254,
            Self::Inch => 25.4,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a distance cannot be normalised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The string was empty or only whitespace.
    #[error("empty distance string")]
    Empty,

    /// The string is not a number optionally followed by a unit.
    #[error("\"{input}\" is not a number followed by a length unit")]
    Malformed {
        /// The rejected input.
        input: String,
    },

    /// The unit suffix is not one of the recognised units.
    #[error("unknown length unit \"{unit}\" in \"{input}\"")]
    UnknownUnit {
        /// The rejected input.
        input: String,
        /// The unrecognised suffix.
        unit: String,
    },

    /// The number (or the converted result) is NaN or infinite.
    #[error("distance \"{input}\" is not a finite number")]
    NotFinite {
        /// The rejected input.
        input: String,
    },
}

/// A distance as authored: a bare number or a unit-suffixed string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistanceInput {
    /// A number already in millimetres.
    Number(f64),
    /// A string such as `"1.27mm"` or `"50mil"`.
    Text(String),
}

impl DistanceInput {
    /// Converts the authored distance into millimetres.
    ///
    /// # Errors
    ///
    /// Returns an error if the string form cannot be parsed or the value is
    /// not finite.
    pub fn normalize(&self) -> Result<Distance, DistanceError> {
        match self {
            Self::Number(value) => normalize_number(*value),
            Self::Text(text) => parse_distance(text),
        }
    }
}

impl From<f64> for DistanceInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DistanceInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DistanceInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Accepts a numeric distance, rejecting NaN and infinities.
///
/// # Errors
///
/// Returns [`DistanceError::NotFinite`] for non-finite values.
pub fn normalize_number(value: f64) -> Result<Distance, DistanceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistanceError::NotFinite {
            input: value.to_string(),
        })
    }
}

/// Number followed by an optional unit suffix, compiled once.
fn distance_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*([A-Za-zµμ]*)$").ok()
        })
        .as_ref()
}

/// Parses a distance string into millimetres.
///
/// Leading and trailing whitespace is ignored, as is whitespace between the
/// number and its unit.
///
/// # Errors
///
/// Returns an error if the string is empty, malformed, uses an unknown
/// unit, or does not produce a finite value.
///
/// # Examples
///
/// ```
/// use pcb_schema::units::parse_distance;
///
/// assert_eq!(parse_distance("2.5mm").unwrap(), 2.5);
/// assert_eq!(parse_distance("1in").unwrap(), 25.4);
/// assert!(parse_distance("3 furlongs").is_err());
/// ```
pub fn parse_distance(input: &str) -> Result<Distance, DistanceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DistanceError::Empty);
    }

    let captures = distance_pattern()
        .and_then(|pattern| pattern.captures(trimmed))
        .ok_or_else(|| DistanceError::Malformed {
            input: input.to_string(),
        })?;

    let number = &captures[1];
    let suffix = &captures[2];

    let value: f64 = number.parse().map_err(|_| DistanceError::Malformed {
        input: input.to_string(),
    })?;

    let unit = if suffix.is_empty() {
        LengthUnit::CANONICAL
    } else {
        LengthUnit::parse(suffix).ok_or_else(|| DistanceError::UnknownUnit {
            input: input.to_string(),
            unit: suffix.to_string(),
        })?
    };

    let millimetres = value * unit.millimetres();
    if !millimetres.is_finite() {
        return Err(DistanceError::NotFinite {
            input: input.to_string(),
        });
    }
    Ok(millimetres)
}
