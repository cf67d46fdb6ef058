//! Policy loading with defaults

use std::path::Path;

use tracing::debug;

use crate::domain::{TransitionGuard, TransitionTable};
use crate::errors::Result;
use crate::fs;
use crate::schemas::GuardPolicy;

/// Load the guard policy, falling back to defaults.
///
/// With no path, the default policy is returned. With a path, the file is
/// read, merged with defaults for any field it leaves out, and validated.
///
/// # Errors
/// * `FileNotFound` - If an explicit path does not exist
/// * `InvalidJson` - If the file is not a valid policy document
/// * `InvalidPolicy` - If a value is out of range
pub fn load_policy(path: Option<&Path>) -> Result<GuardPolicy> {
    let policy = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading guard policy");
            fs::read_json::<GuardPolicy>(path)?
        }
        None => GuardPolicy::default(),
    };
    policy.validate()?;
    Ok(policy)
}

/// Build a guard over the standard table with the policy at `path`.
pub fn build_guard(path: Option<&Path>) -> Result<TransitionGuard> {
    TransitionGuard::new(TransitionTable::standard(), load_policy(path)?)
}
