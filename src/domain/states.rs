//! Claim workflow state and role catalogues
//!
//! The claim workflow is a graph, not a line:
//! submitted → under_review | assigned → investigation → resolved → closed,
//! with pending_documentation as a side loop and rejected as an exit that
//! still passes through an appeal window before closing.

use crate::schemas::{ClaimState, Role};

/// Every claim state, in rough workflow order.
pub const CLAIM_STATES: &[ClaimState] = &[
    ClaimState::Submitted,
    ClaimState::UnderReview,
    ClaimState::Assigned,
    ClaimState::Investigation,
    ClaimState::PendingDocumentation,
    ClaimState::Resolved,
    ClaimState::Rejected,
    ClaimState::Closed,
];

/// Human roles from least to most capable. `System` is listed last and is
/// outside the ordering.
pub const ROLES: &[Role] = &[Role::Member, Role::Steward, Role::Admin, Role::System];

/// Check if a state is the terminal state (closed).
pub fn is_terminal_state(state: ClaimState) -> bool {
    state.is_terminal()
}

/// The least capable human role in `roles`, if any.
pub fn minimum_role(roles: &[Role]) -> Option<Role> {
    roles
        .iter()
        .copied()
        .filter_map(|role| role.rank().map(|rank| (rank, role)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, role)| role)
}
