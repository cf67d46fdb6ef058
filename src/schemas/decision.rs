//! Transition decision - the sole output of the guard engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which guard rejected a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// No such edge in the transition table
    InvalidTransition,
    /// Requester role is not in the edge's role set
    UnauthorizedRole,
    /// Claim has not dwelt long enough in its current state
    InsufficientDwellTime,
    /// Closing while CRITICAL signals are unresolved
    UnresolvedCriticalSignals,
    /// Edge needs documentation and none was supplied
    MissingDocumentation,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::InvalidTransition => "invalid_transition",
            RejectionKind::UnauthorizedRole => "unauthorized_role",
            RejectionKind::InsufficientDwellTime => "insufficient_dwell_time",
            RejectionKind::UnresolvedCriticalSignals => "unresolved_critical_signals",
            RejectionKind::MissingDocumentation => "missing_documentation",
        }
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SLA classification of the time spent in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    Compliant,
    AtRisk,
    Breached,
}

/// SLA figures attached to an allowed decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaMetadata {
    pub sla_compliant: bool,

    pub sla_status: SlaStatus,

    pub sla_deadline: DateTime<Utc>,

    /// Whole days left before the deadline; negative when overdue
    pub days_remaining: i64,
}

/// Outcome of a transition check.
///
/// `reason` and `required_actions` are only set on rejections; `warnings` and
/// `metadata` only on allowed transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDecision {
    pub allowed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_actions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SlaMetadata>,
}

impl TransitionDecision {
    /// An allowed decision carrying SLA metadata and an optional warning
    pub fn allow(metadata: SlaMetadata, warning: Option<String>) -> Self {
        TransitionDecision {
            allowed: true,
            rejection: None,
            reason: None,
            required_actions: None,
            warnings: warning.map(|w| vec![w]),
            metadata: Some(metadata),
        }
    }

    /// A rejected decision
    pub fn reject(
        kind: RejectionKind,
        reason: impl Into<String>,
        required_actions: Option<Vec<String>>,
    ) -> Self {
        TransitionDecision {
            allowed: false,
            rejection: Some(kind),
            reason: Some(reason.into()),
            required_actions,
            warnings: None,
            metadata: None,
        }
    }

    /// Whether the rejection's remediation list contains `action` verbatim
    pub fn requires_action(&self, action: &str) -> bool {
        self.required_actions
            .as_ref()
            .is_some_and(|actions| actions.iter().any(|a| a == action))
    }

    /// SLA compliance, if the transition was allowed
    pub fn sla_compliant(&self) -> Option<bool> {
        self.metadata.as_ref().map(|m| m.sla_compliant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata(status: SlaStatus) -> SlaMetadata {
        SlaMetadata {
            sla_compliant: status != SlaStatus::Breached,
            sla_status: status,
            sla_deadline: Utc.with_ymd_and_hms(2026, 3, 12, 9, 0, 0).unwrap(),
            days_remaining: 4,
        }
    }

    #[test]
    fn test_allow_without_warning() {
        let decision = TransitionDecision::allow(metadata(SlaStatus::Compliant), None);
        assert!(decision.allowed);
        assert!(decision.reason.is_none());
        assert!(decision.required_actions.is_none());
        assert!(decision.warnings.is_none());
        assert_eq!(decision.sla_compliant(), Some(true));
    }

    #[test]
    fn test_allow_with_warning() {
        let decision = TransitionDecision::allow(
            metadata(SlaStatus::AtRisk),
            Some("SLA AT RISK: 1 day(s) remaining".to_string()),
        );
        assert_eq!(decision.warnings.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_reject_has_no_sla_side_channel() {
        let decision = TransitionDecision::reject(
            RejectionKind::UnresolvedCriticalSignals,
            "Cannot close claim with unresolved critical signals",
            Some(vec!["Resolve all CRITICAL severity signals".to_string()]),
        );
        assert!(!decision.allowed);
        assert!(decision.metadata.is_none());
        assert!(decision.warnings.is_none());
        assert_eq!(decision.sla_compliant(), None);
        assert!(decision.requires_action("Resolve all CRITICAL severity signals"));
        assert!(!decision.requires_action("Resolve all CRITICAL"));
    }

    #[test]
    fn test_rejection_serializes_snake_case() {
        let decision =
            TransitionDecision::reject(RejectionKind::InvalidTransition, "Invalid transition", None);
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"rejection\":\"invalid_transition\""));
        assert!(!json.contains("\"required_actions\":"));
        assert!(!json.contains("\"metadata\":"));
    }
}
