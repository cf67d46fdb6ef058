//! CLI command implementations

pub mod allowed;
pub mod graph;
pub mod policy;
pub mod requirements;
pub mod validate;
