//! PCB-level elements.
//!
//! - [`plated_hole`] — plated through holes in four shapes

pub mod plated_hole;

pub use plated_hole::{
    parse_plated_hole, OvalShape, PcbHoleCircularWithRectPad, PcbHoleCircularWithRectPadInput,
    PcbHolePillWithRectPad, PcbHolePillWithRectPadInput, PcbPlatedHole, PcbPlatedHoleCircle,
    PcbPlatedHoleCircleInput, PcbPlatedHoleInput, PcbPlatedHoleOval, PcbPlatedHoleOvalInput,
    PlatedHoleCommon, PlatedHoleCommonInput, PlatedHoleShape, PLATED_HOLE_ID_PREFIX,
};
