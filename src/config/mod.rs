//! Guard policy configuration

mod loader;

pub use loader::{build_guard, load_policy};
