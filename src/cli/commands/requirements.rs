//! Requirements command - show what a single transition needs

use crate::cli::to_json;
use crate::domain::{TransitionEdge, TransitionGuard};
use crate::errors::{ClaimGuardError, Result};
use crate::schemas::{ClaimState, Role};

/// One-line summary of an edge, shared with the graph command
pub fn describe(edge: &TransitionEdge) -> String {
    let roles: Vec<&str> = edge.requires_role.iter().map(Role::as_str).collect();
    format!(
        "{} -> {}  roles: {}  min_hours: {}  documentation: {}",
        edge.from,
        edge.to,
        roles.join(", "),
        edge.min_hours,
        if edge.requires_documentation { "required" } else { "not required" }
    )
}

/// Render the requirements of `from -> to`
///
/// # Errors
/// * `InvalidTransition` - if the edge is not part of the workflow
pub fn render(guard: &TransitionGuard, from: ClaimState, to: ClaimState, json: bool) -> Result<String> {
    let edge = guard
        .transition_requirements(from, to)
        .ok_or_else(|| ClaimGuardError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })?;
    if json {
        return to_json(edge);
    }
    Ok(describe(edge))
}

pub fn run(guard: &TransitionGuard, from: ClaimState, to: ClaimState, json: bool) -> Result<()> {
    println!("{}", render(guard, from, to, json)?);
    Ok(())
}
