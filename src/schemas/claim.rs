//! Claim schema - workflow states, actor roles, priorities and the claim record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ClaimGuardError;

/// Workflow state of a grievance claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimState {
    /// Filed by or on behalf of a member
    Submitted,
    /// Intake review by a steward
    UnderReview,
    /// Assigned to a steward for handling
    Assigned,
    /// Active investigation
    Investigation,
    /// Waiting on documents from the member or employer
    PendingDocumentation,
    /// Outcome reached, in the cooling-off period
    Resolved,
    /// Claim rejected, in the appeal window
    Rejected,
    /// Terminal state
    Closed,
}

impl ClaimState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimState::Submitted => "submitted",
            ClaimState::UnderReview => "under_review",
            ClaimState::Assigned => "assigned",
            ClaimState::Investigation => "investigation",
            ClaimState::PendingDocumentation => "pending_documentation",
            ClaimState::Resolved => "resolved",
            ClaimState::Rejected => "rejected",
            ClaimState::Closed => "closed",
        }
    }

    /// `closed` has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        *self == ClaimState::Closed
    }

    /// States that finalize the case file (resolution or closure).
    pub fn is_outcome(&self) -> bool {
        matches!(self, ClaimState::Resolved | ClaimState::Closed)
    }
}

impl std::fmt::Display for ClaimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimState {
    type Err = ClaimGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ClaimState::Submitted),
            "under_review" => Ok(ClaimState::UnderReview),
            "assigned" => Ok(ClaimState::Assigned),
            "investigation" => Ok(ClaimState::Investigation),
            "pending_documentation" => Ok(ClaimState::PendingDocumentation),
            "resolved" => Ok(ClaimState::Resolved),
            "rejected" => Ok(ClaimState::Rejected),
            "closed" => Ok(ClaimState::Closed),
            _ => Err(ClaimGuardError::UnknownState(s.to_string())),
        }
    }
}

/// Role of the actor requesting a transition
///
/// Human roles are ordered `member < steward < admin`. `System` stands outside
/// that ordering: it is the automation actor and is authorized for every edge
/// that exists in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Steward,
    Admin,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Steward => "steward",
            Role::Admin => "admin",
            Role::System => "system",
        }
    }

    /// Position in the human capability ordering; `None` for `System`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Role::Member => Some(0),
            Role::Steward => Some(1),
            Role::Admin => Some(2),
            Role::System => None,
        }
    }

    pub fn is_system(&self) -> bool {
        *self == Role::System
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ClaimGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "steward" => Ok(Role::Steward),
            "admin" => Ok(Role::Admin),
            "system" => Ok(Role::System),
            _ => Err(ClaimGuardError::UnknownRole(s.to_string())),
        }
    }
}

/// Claim priority, used only for SLA evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = ClaimGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(ClaimGuardError::UnknownPriority(s.to_string())),
        }
    }
}

/// The slice of a claim record the guard engine cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim identifier (e.g. "CLM-2026-0042")
    pub id: String,

    /// Current workflow state
    pub state: ClaimState,

    pub priority: Priority,

    /// When the claim entered its current state
    pub status_changed_at: DateTime<Utc>,

    /// Last modification of the record
    pub updated_at: DateTime<Utc>,

    /// Set when the claim enters `closed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Create a freshly submitted claim
    pub fn new(id: impl Into<String>, priority: Priority, submitted_at: DateTime<Utc>) -> Self {
        Claim {
            id: id.into(),
            state: ClaimState::Submitted,
            priority,
            status_changed_at: submitted_at,
            updated_at: submitted_at,
            closed_at: None,
        }
    }

    /// Return a new Claim in `state`, entered at `at`.
    ///
    /// Resets the dwell clock and stamps `closed_at` when the claim closes.
    pub fn with_state(mut self, state: ClaimState, at: DateTime<Utc>) -> Self {
        self.state = state;
        self.status_changed_at = at;
        self.updated_at = at;
        if state.is_terminal() {
            self.closed_at = Some(at);
        }
        self
    }

    /// Return a new Claim with a different priority
    pub fn with_priority(mut self, priority: Priority, at: DateTime<Utc>) -> Self {
        self.priority = priority;
        self.updated_at = at;
        self
    }
}
