//! Transition table: the claim workflow graph and per-edge requirements
//!
//! Built once and never mutated. The standard table encodes the union's
//! grievance procedure; tests and alternative deployments may supply their
//! own edges through [`TransitionTable::from_edges`], which checks the graph
//! invariants up front.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ClaimGuardError, Result};
use crate::schemas::{ClaimState, Role};

use super::states::CLAIM_STATES;

/// Requirements for moving a claim along one edge of the workflow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub from: ClaimState,

    pub to: ClaimState,

    /// Human roles allowed to take this edge (`system` is always allowed)
    pub requires_role: Vec<Role>,

    /// Minimum hours the claim must have spent in `from`
    #[serde(default)]
    pub min_hours: u32,

    /// Whether documentation (or detailed notes) must accompany the move
    #[serde(default)]
    pub requires_documentation: bool,
}

impl TransitionEdge {
    /// An edge with no dwell or documentation requirement
    pub fn new(from: ClaimState, to: ClaimState, requires_role: &[Role]) -> Self {
        TransitionEdge {
            from,
            to,
            requires_role: requires_role.to_vec(),
            min_hours: 0,
            requires_documentation: false,
        }
    }

    pub fn with_min_hours(mut self, hours: u32) -> Self {
        self.min_hours = hours;
        self
    }

    pub fn with_documentation(mut self) -> Self {
        self.requires_documentation = true;
        self
    }

    /// Whether `role` may take this edge.
    pub fn permits(&self, role: Role) -> bool {
        role.is_system() || self.requires_role.contains(&role)
    }
}

const STEWARD_UP: &[Role] = &[Role::Steward, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const ANY_HUMAN: &[Role] = &[Role::Member, Role::Steward, Role::Admin];

/// Seven-day cooling-off period after resolution
const RESOLUTION_COOLING_OFF_HOURS: u32 = 168;

fn standard_edges() -> Vec<TransitionEdge> {
    use ClaimState::*;

    vec![
        TransitionEdge::new(Submitted, UnderReview, STEWARD_UP),
        TransitionEdge::new(Submitted, Assigned, STEWARD_UP),
        TransitionEdge::new(Submitted, Rejected, ADMIN_ONLY).with_documentation(),
        TransitionEdge::new(UnderReview, Investigation, STEWARD_UP).with_min_hours(24),
        TransitionEdge::new(UnderReview, Assigned, STEWARD_UP),
        TransitionEdge::new(UnderReview, PendingDocumentation, STEWARD_UP),
        TransitionEdge::new(UnderReview, Rejected, ADMIN_ONLY).with_documentation(),
        TransitionEdge::new(Assigned, Investigation, STEWARD_UP),
        TransitionEdge::new(Assigned, UnderReview, STEWARD_UP),
        TransitionEdge::new(Assigned, PendingDocumentation, STEWARD_UP),
        TransitionEdge::new(Investigation, Resolved, STEWARD_UP)
            .with_min_hours(72)
            .with_documentation(),
        TransitionEdge::new(Investigation, PendingDocumentation, STEWARD_UP),
        TransitionEdge::new(Investigation, Rejected, ADMIN_ONLY).with_documentation(),
        // The member answers a documentation request themselves
        TransitionEdge::new(PendingDocumentation, UnderReview, ANY_HUMAN).with_documentation(),
        TransitionEdge::new(PendingDocumentation, Investigation, STEWARD_UP).with_documentation(),
        TransitionEdge::new(PendingDocumentation, Rejected, ADMIN_ONLY).with_documentation(),
        TransitionEdge::new(Resolved, Closed, ADMIN_ONLY)
            .with_min_hours(RESOLUTION_COOLING_OFF_HOURS)
            .with_documentation(),
        TransitionEdge::new(Resolved, Investigation, STEWARD_UP).with_documentation(),
        TransitionEdge::new(Rejected, Closed, ADMIN_ONLY).with_documentation(),
        TransitionEdge::new(Rejected, UnderReview, ADMIN_ONLY).with_documentation(),
    ]
}

/// Immutable workflow graph keyed by source state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    edges: BTreeMap<ClaimState, Vec<TransitionEdge>>,
}

impl TransitionTable {
    /// The standard grievance workflow
    pub fn standard() -> Self {
        Self::index(standard_edges())
    }

    /// Build a table from arbitrary edges, enforcing the graph invariants:
    /// non-empty role sets, no edges out of `closed`, no self-loops, no
    /// duplicates, and at least one edge out of every non-terminal state.
    pub fn from_edges(edges: impl IntoIterator<Item = TransitionEdge>) -> Result<Self> {
        let edges: Vec<TransitionEdge> = edges.into_iter().collect();

        for (i, edge) in edges.iter().enumerate() {
            if edge.requires_role.is_empty() {
                return Err(ClaimGuardError::InvalidTable(format!(
                    "edge {} -> {} has an empty role set",
                    edge.from, edge.to
                )));
            }
            if edge.from.is_terminal() {
                return Err(ClaimGuardError::InvalidTable(format!(
                    "terminal state {} cannot have outgoing edge to {}",
                    edge.from, edge.to
                )));
            }
            if edge.from == edge.to {
                return Err(ClaimGuardError::InvalidTable(format!(
                    "self-loop on {}",
                    edge.from
                )));
            }
            if edges[..i].iter().any(|e| e.from == edge.from && e.to == edge.to) {
                return Err(ClaimGuardError::InvalidTable(format!(
                    "duplicate edge {} -> {}",
                    edge.from, edge.to
                )));
            }
        }

        let table = Self::index(edges);
        if let Some(stranded) = CLAIM_STATES
            .iter()
            .find(|s| !s.is_terminal() && table.edges_from(**s).is_empty())
        {
            return Err(ClaimGuardError::InvalidTable(format!(
                "non-terminal state {} has no outgoing edges",
                stranded
            )));
        }
        Ok(table)
    }

    fn index(edges: Vec<TransitionEdge>) -> Self {
        let mut map: BTreeMap<ClaimState, Vec<TransitionEdge>> = BTreeMap::new();
        for edge in edges {
            map.entry(edge.from).or_default().push(edge);
        }
        TransitionTable { edges: map }
    }

    /// Whether an edge `from -> to` exists.
    pub fn is_reachable(&self, from: ClaimState, to: ClaimState) -> bool {
        self.edge_requirements(from, to).is_some()
    }

    /// Requirements of the edge `from -> to`, or `None` if there is no such
    /// edge (always `None` from `closed`).
    pub fn edge_requirements(&self, from: ClaimState, to: ClaimState) -> Option<&TransitionEdge> {
        self.edges_from(from).iter().find(|edge| edge.to == to)
    }

    /// All edges leaving `from`, in declaration order.
    pub fn edges_from(&self, from: ClaimState) -> &[TransitionEdge] {
        self.edges.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// States reachable in one step from `from`.
    pub fn reachable_from(&self, from: ClaimState) -> Vec<ClaimState> {
        self.edges_from(from).iter().map(|edge| edge.to).collect()
    }

    /// Every edge, grouped by source state.
    pub fn edges(&self) -> impl Iterator<Item = &TransitionEdge> {
        self.edges.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}
