//! Fixed string discriminants.
//!
//! Each tag is a zero-sized type that serialises as exactly one string and
//! refuses to deserialise from anything else, so a canonical record cannot
//! carry a mismatched discriminant.

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};

macro_rules! literal_tag {
    ($(#[$meta:meta])* $name:ident => $value:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl $name {
            /// The wire value of this tag.
            pub const VALUE: &'static str = $value;
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(Self::VALUE)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                if s == Self::VALUE {
                    Ok(Self)
                } else {
                    Err(de::Error::invalid_value(de::Unexpected::Str(&s), &Self::VALUE))
                }
            }
        }
    };
}

literal_tag!(
    /// `type` of every plated hole record.
    PlatedHoleType => "pcb_plated_hole"
);
literal_tag!(
    /// `shape` of a circular plated hole.
    CircleShape => "circle"
);
literal_tag!(
    /// `shape` of a circular hole with a rectangular pad.
    CircularHoleWithRectPadShape => "circular_hole_with_rect_pad"
);
literal_tag!(
    /// `shape` of a pill hole with a rectangular pad.
    PillHoleWithRectPadShape => "pill_hole_with_rect_pad"
);
literal_tag!(
    /// `hole_shape` of a circular hole with a rectangular pad.
    CircleHoleShape => "circle"
);
literal_tag!(
    /// `hole_shape` of a pill hole with a rectangular pad.
    PillHoleShape => "pill"
);
literal_tag!(
    /// `pad_shape` of the hybrid hole variants.
    RectPadShape => "rect"
);
literal_tag!(
    /// `type` of every source component record.
    SourceComponentType => "source_component"
);
literal_tag!(
    /// `ftype` of a simple pushbutton.
    SimplePushbuttonFtype => "simple_pushbutton"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_as_literal() {
        assert_eq!(
            serde_json::to_string(&PlatedHoleType).unwrap(),
            "\"pcb_plated_hole\""
        );
    }

    #[test]
    fn rejects_other_strings() {
        assert!(serde_json::from_str::<RectPadShape>("\"rect\"").is_ok());
        let err = serde_json::from_str::<RectPadShape>("\"circle\"").unwrap_err();
        assert!(err.to_string().contains("rect"));
    }
}
