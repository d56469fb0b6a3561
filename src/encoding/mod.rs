//! Visual encoding of motifs: every distinct token gets a colour and a pattern.
//!
//! The assignment lives in the private `core` module; `pattern` holds the
//! closed set of decorations drawn on top of a colour swatch.

mod core;
pub mod pattern;

pub use self::core::{
    CapacityWarning, Encoding, LegendOrder, Mapping, MappingEntry, Token, build_mapping,
};
pub use pattern::{PATTERN_COUNT, Pattern};
