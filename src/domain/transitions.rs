//! Applying a guarded transition to a claim record
//!
//! Pure: the input claim is never mutated, and nothing is persisted. The
//! caller writes `next_claim` and `record` in the same transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::schemas::{
    Claim, ClaimState, Role, SlaMetadata, TransitionContext, TransitionDecision,
};

use super::engine::TransitionGuard;

/// A requested state change for a stored claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub target_state: ClaimState,

    pub requester_id: String,

    pub requester_role: Role,

    #[serde(default)]
    pub has_required_documentation: bool,

    #[serde(default)]
    pub has_unresolved_critical_signals: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransitionRequest {
    pub fn new(target_state: ClaimState, requester_id: impl Into<String>, requester_role: Role) -> Self {
        TransitionRequest {
            target_state,
            requester_id: requester_id.into(),
            requester_role,
            has_required_documentation: false,
            has_unresolved_critical_signals: false,
            notes: None,
        }
    }

    pub fn with_documentation(mut self, present: bool) -> Self {
        self.has_required_documentation = present;
        self
    }

    pub fn with_critical_signals(mut self, unresolved: bool) -> Self {
        self.has_unresolved_critical_signals = unresolved;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Claim {
    /// Build the guard context for moving this claim as `request` asks.
    pub fn transition_context(&self, request: &TransitionRequest) -> TransitionContext {
        TransitionContext {
            claim_id: self.id.clone(),
            current_state: self.state,
            target_state: request.target_state,
            requester_id: request.requester_id.clone(),
            requester_role: request.requester_role,
            priority: self.priority,
            status_changed_at: self.status_changed_at,
            has_required_documentation: request.has_required_documentation,
            has_unresolved_critical_signals: request.has_unresolved_critical_signals,
            notes: request.notes.clone(),
        }
    }
}

/// Audit entry for an applied transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub claim_id: String,
    pub from: ClaimState,
    pub to: ClaimState,
    pub actor_id: String,
    pub actor_role: Role,
    pub at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// SLA warnings raised when the transition was allowed
    #[serde(default)]
    pub warnings: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla: Option<SlaMetadata>,
}

impl TransitionRecord {
    /// Whether this transition finalizes the case file (resolution or
    /// closure), which is when a defensibility pack is assembled.
    pub fn finalizes_case(&self) -> bool {
        self.to.is_outcome()
    }
}

/// Result of a claim transition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// The guards passed
    Applied {
        /// The claim in its new state
        next_claim: Claim,
        /// Audit entry to store alongside it
        record: TransitionRecord,
    },
    /// A guard rejected the transition
    Rejected {
        /// The decision explaining why
        decision: TransitionDecision,
    },
}

impl TransitionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionResult::Applied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, TransitionResult::Rejected { .. })
    }

    /// Get the new claim if the transition was applied
    pub fn claim(self) -> Option<Claim> {
        match self {
            TransitionResult::Applied { next_claim, .. } => Some(next_claim),
            TransitionResult::Rejected { .. } => None,
        }
    }

    /// Get the rejection decision if the transition was refused
    pub fn decision(self) -> Option<TransitionDecision> {
        match self {
            TransitionResult::Applied { .. } => None,
            TransitionResult::Rejected { decision } => Some(decision),
        }
    }
}

/// Validate `request` against `claim` and, if allowed, produce the moved
/// claim and its audit record.
///
/// # Errors
/// * `MalformedContext` - if the claim or requester identifier is empty
pub fn apply_claim_transition(
    guard: &TransitionGuard,
    claim: &Claim,
    request: &TransitionRequest,
    now: DateTime<Utc>,
) -> Result<TransitionResult> {
    let ctx = claim.transition_context(request);
    let decision = guard.validate_transition(&ctx, now)?;
    if !decision.allowed {
        return Ok(TransitionResult::Rejected { decision });
    }

    let record = TransitionRecord {
        claim_id: claim.id.clone(),
        from: claim.state,
        to: request.target_state,
        actor_id: request.requester_id.clone(),
        actor_role: request.requester_role,
        at: now,
        notes: request.notes.clone(),
        warnings: decision.warnings.unwrap_or_default(),
        sla: decision.metadata,
    };
    let next_claim = claim.clone().with_state(request.target_state, now);

    Ok(TransitionResult::Applied { next_claim, record })
}
