//! Source (schematic-side) components.
//!
//! - [`base`] — the shared `source_component` record
//! - [`simple_pushbutton`] — the `simple_pushbutton` kind

pub mod base;
pub mod simple_pushbutton;

pub use base::{parse_source_component, SourceComponent, SourceComponentBase};
pub use simple_pushbutton::{parse_simple_pushbutton, SourceSimplePushbutton};
