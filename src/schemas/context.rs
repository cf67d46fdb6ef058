//! Transition context - everything the guard engine needs for one decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ClaimGuardError, Result};

use super::claim::{ClaimState, Priority, Role};

/// Input to a single transition decision.
///
/// Built by the caller from the claim record and the resolved identity of the
/// requester. The engine trusts these values as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContext {
    pub claim_id: String,

    /// State the claim is in now
    pub current_state: ClaimState,

    /// State the requester wants to move to
    pub target_state: ClaimState,

    pub requester_id: String,

    pub requester_role: Role,

    pub priority: Priority,

    /// When the claim entered `current_state`
    pub status_changed_at: DateTime<Utc>,

    /// Formal documentation is attached to the claim
    #[serde(default)]
    pub has_required_documentation: bool,

    /// At least one CRITICAL severity signal is still open
    #[serde(default)]
    pub has_unresolved_critical_signals: bool,

    /// Free-text notes accompanying the transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransitionContext {
    /// Create a context with every optional flag cleared
    pub fn new(
        claim_id: impl Into<String>,
        current_state: ClaimState,
        target_state: ClaimState,
        requester_id: impl Into<String>,
        requester_role: Role,
        priority: Priority,
        status_changed_at: DateTime<Utc>,
    ) -> Self {
        TransitionContext {
            claim_id: claim_id.into(),
            current_state,
            target_state,
            requester_id: requester_id.into(),
            requester_role,
            priority,
            status_changed_at,
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

    /// Reject contexts that point at an integration bug rather than a
    /// business-rule violation.
    pub fn ensure_well_formed(&self) -> Result<()> {
        if self.claim_id.trim().is_empty() {
            return Err(ClaimGuardError::MalformedContext(
                "claim_id must not be empty".to_string(),
            ));
        }
        if self.requester_id.trim().is_empty() {
            return Err(ClaimGuardError::MalformedContext(
                "requester_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn changed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn sample() -> TransitionContext {
        TransitionContext::new(
            "claim_123",
            ClaimState::Submitted,
            ClaimState::UnderReview,
            "steward_456",
            Role::Steward,
            Priority::Medium,
            changed_at(),
        )
    }

    #[test]
    fn test_new_context_clears_flags() {
        let ctx = sample();
        assert!(!ctx.has_required_documentation);
        assert!(!ctx.has_unresolved_critical_signals);
        assert!(ctx.notes.is_none());
    }

    #[test]
    fn test_builder_flags() {
        let ctx = sample()
            .with_documentation(true)
            .with_critical_signals(true)
            .with_notes("Member provided pay stubs");
        assert!(ctx.has_required_documentation);
        assert!(ctx.has_unresolved_critical_signals);
        assert_eq!(ctx.notes.as_deref(), Some("Member provided pay stubs"));
    }

    #[test]
    fn test_partial_json_defaults_optional_flags() {
        let json = r#"{
            "claim_id": "claim_123",
            "current_state": "under_review",
            "target_state": "investigation",
            "requester_id": "steward_456",
            "requester_role": "steward",
            "priority": "medium",
            "status_changed_at": "2026-03-02T09:00:00Z"
        }"#;
        let ctx: TransitionContext = serde_json::from_str(json).unwrap();

        assert_eq!(ctx.current_state, ClaimState::UnderReview);
        assert_eq!(ctx.target_state, ClaimState::Investigation);
        assert_eq!(ctx.status_changed_at, changed_at());
        assert!(!ctx.has_required_documentation);
        assert!(ctx.notes.is_none());
    }

    #[test]
    fn test_unknown_target_state_fails_to_parse() {
        let json = r#"{
            "claim_id": "claim_123",
            "current_state": "closed",
            "target_state": "reopened",
            "requester_id": "admin_1",
            "requester_role": "admin",
            "priority": "medium",
            "status_changed_at": "2026-03-02T09:00:00Z"
        }"#;
        assert!(serde_json::from_str::<TransitionContext>(json).is_err());
    }

    #[test]
    fn test_ensure_well_formed() {
        assert!(sample().ensure_well_formed().is_ok());

        let mut ctx = sample();
        ctx.claim_id = "  ".to_string();
        assert_eq!(ctx.ensure_well_formed().unwrap_err().code(), "MALFORMED_CONTEXT");

        let mut ctx = sample();
        ctx.requester_id = String::new();
        let err = ctx.ensure_well_formed().unwrap_err();
        assert!(err.to_string().contains("requester_id"));
    }
}
