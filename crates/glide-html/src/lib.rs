//! Glide HTML
//!
//! HTML5 parsing for the soft-navigation engine: whole fetched documents,
//! and the fragment insertion used for content-region swaps.

mod parser;

pub use parser::{parse, parse_fragment_into};
