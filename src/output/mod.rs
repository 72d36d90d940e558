//! Output formatting module
//!
//! Results are printed as JSON, compact or pretty.

pub mod json;

pub use json::{print_json, to_json};
