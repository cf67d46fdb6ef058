//! File system utilities for claimguard
//!
//! JSON input for contexts and policy files.

mod json;

pub use json::{parse_json, read_json, read_json_input};
