//! pcb-schema: validated, normalised records for PCB design elements
//!
//! This library turns loosely-authored JSON records into canonical,
//! strongly-typed values that rendering, netlist and manufacturing tools can
//! consume without validating again.
//!
//! # Architecture
//!
//! Validation is a pure, single pass per record:
//!
//! - **Discriminant dispatch**: `type`, then `shape` (and the secondary tags
//!   of the hybrid hole shapes) select exactly one record variant
//! - **Distance normalisation**: numbers and unit strings (`"0.5mm"`,
//!   `"20mil"`) become millimetres
//! - **Identifier defaulting**: missing IDs are generated from an injected
//!   [`ids::IdGenerator`]
//!
//! Geometry checks (clearances, annular ring sizes) are left to consumers.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`element`] — Dispatch over every supported element type
//! - [`error`] — Error types
//! - [`ids`] — Identifier generation
//! - [`layer`] — Board layer references
//! - [`pcb`] — Plated holes
//! - [`source`] — Source components
//! - [`tags`] — Fixed string discriminants
//! - [`units`] — Distance normalisation
//! - [`validator`] — Validator bound to an identifier generator

pub mod config;
pub mod element;
pub mod error;
mod fields;
pub mod ids;
pub mod layer;
pub mod pcb;
pub mod source;
pub mod tags;
pub mod units;
pub mod validator;

pub use element::{parse_element, parse_elements, Element};
pub use error::{DocumentError, SchemaError, SchemaResult};
pub use pcb::{parse_plated_hole, PcbPlatedHole, PcbPlatedHoleInput};
pub use validator::Validator;
