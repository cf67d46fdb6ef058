//! Allowed command - list the targets a role may move a claim to

use crate::cli::to_json;
use crate::domain::TransitionGuard;
use crate::errors::Result;
use crate::schemas::{ClaimState, Role};

/// Render the allowed targets of `state` for `role`
pub fn render(guard: &TransitionGuard, state: ClaimState, role: Role, json: bool) -> Result<String> {
    let targets = guard.allowed_transitions(state, role);
    if json {
        return to_json(&targets);
    }
    if targets.is_empty() {
        return Ok(format!("No transitions from {} are available to {}", state, role));
    }
    Ok(targets
        .iter()
        .map(ClaimState::as_str)
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn run(guard: &TransitionGuard, state: ClaimState, role: Role, json: bool) -> Result<()> {
    println!("{}", render(guard, state, role, json)?);
    Ok(())
}
