//! Text codecs shared by every settings value.
//!
//! Composite values (chords, path groups, list rows) encode themselves in the
//! `domain` module; this module holds the scalar forms they build on.

pub mod scalars;

pub use scalars::{format_bool, format_float, parse_bool, parse_float, parse_int};
