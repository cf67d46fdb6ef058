//! Individual transition guards
//!
//! Each guard is a pure function that either passes or produces a
//! [`GuardRejection`] naming the failed constraint. The engine chains them
//! with `?` in a fixed order.

use chrono::{DateTime, Utc};

use crate::schemas::{
    ClaimState, DocumentationPolicy, RejectionKind, Role, TransitionDecision,
};

use super::states::minimum_role;
use super::table::{TransitionEdge, TransitionTable};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Remediation that must accompany every critical-signal rejection.
pub const RESOLVE_CRITICAL_SIGNALS: &str = "Resolve all CRITICAL severity signals";

/// A failed guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRejection {
    pub kind: RejectionKind,
    pub reason: String,
    pub required_actions: Option<Vec<String>>,
}

impl GuardRejection {
    fn new(kind: RejectionKind, reason: String, required_actions: Option<Vec<String>>) -> Self {
        GuardRejection {
            kind,
            reason,
            required_actions,
        }
    }
}

impl From<GuardRejection> for TransitionDecision {
    fn from(rejection: GuardRejection) -> Self {
        TransitionDecision::reject(rejection.kind, rejection.reason, rejection.required_actions)
    }
}

/// Result of a single guard
pub type GuardResult<T = ()> = std::result::Result<T, GuardRejection>;

/// Graph legality: the edge must exist in the table.
pub fn check_reachable(
    table: &TransitionTable,
    from: ClaimState,
    to: ClaimState,
) -> GuardResult<&TransitionEdge> {
    if let Some(edge) = table.edge_requirements(from, to) {
        return Ok(edge);
    }

    let reason = if from.is_terminal() {
        format!(
            "Invalid transition: {} is a terminal state and cannot move to {}",
            from, to
        )
    } else {
        let targets: Vec<&str> = table.edges_from(from).iter().map(|e| e.to.as_str()).collect();
        format!(
            "Invalid transition: {} cannot move to {} (allowed targets: {})",
            from,
            to,
            targets.join(", ")
        )
    };
    Err(GuardRejection::new(RejectionKind::InvalidTransition, reason, None))
}

/// Role authorization. `system` passes every existing edge.
pub fn check_role(edge: &TransitionEdge, role: Role) -> GuardResult {
    if edge.permits(role) {
        return Ok(());
    }

    let authorized: Vec<&str> = edge.requires_role.iter().map(Role::as_str).collect();
    let mut actions = Vec::with_capacity(2);
    if let Some(min) = minimum_role(&edge.requires_role) {
        actions.push(format!(
            "Ask a user with at least the {} role to perform this transition",
            min
        ));
    }
    actions.push(format!("Authorized roles: {}", authorized.join(", ")));

    Err(GuardRejection::new(
        RejectionKind::UnauthorizedRole,
        format!(
            "User role '{}' is not authorized for transition {} -> {}",
            role, edge.from, edge.to
        ),
        Some(actions),
    ))
}

/// Milliseconds spent in the current state. A `status_changed_at` in the
/// future counts as zero.
pub fn dwell_millis(status_changed_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(status_changed_at)
        .num_milliseconds()
        .max(0)
}

/// Minimum dwell time in the current state.
pub fn check_dwell_time(
    edge: &TransitionEdge,
    status_changed_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> GuardResult {
    let required = i64::from(edge.min_hours) * MILLIS_PER_HOUR;
    let elapsed = dwell_millis(status_changed_at, now);
    if elapsed >= required {
        return Ok(());
    }

    let remaining_hours = (required - elapsed + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR;
    Err(GuardRejection::new(
        RejectionKind::InsufficientDwellTime,
        format!(
            "Transition {} -> {} requires a minimum duration of {} hours in {} ({} hours remaining)",
            edge.from, edge.to, edge.min_hours, edge.from, remaining_hours
        ),
        Some(vec![format!(
            "Wait {} more hours before moving the claim to {}",
            remaining_hours, edge.to
        )]),
    ))
}

/// Closing is blocked while CRITICAL signals are unresolved.
pub fn check_critical_signals(target: ClaimState, has_unresolved_critical: bool) -> GuardResult {
    if target != ClaimState::Closed || !has_unresolved_critical {
        return Ok(());
    }

    Err(GuardRejection::new(
        RejectionKind::UnresolvedCriticalSignals,
        "Cannot close claim while critical signals are unresolved".to_string(),
        Some(vec![
            RESOLVE_CRITICAL_SIGNALS.to_string(),
            "Record how each signal was resolved on the claim".to_string(),
        ]),
    ))
}

/// Whether free-text notes are detailed enough to stand in for formal
/// documentation. Length is the only proxy for substance.
pub fn notes_are_detailed(notes: Option<&str>, min_length: usize) -> bool {
    notes
        .map(str::trim)
        .is_some_and(|n| !n.is_empty() && n.chars().count() >= min_length)
}

/// Documentation requirement of the edge.
pub fn check_documentation(
    edge: &TransitionEdge,
    has_required_documentation: bool,
    notes: Option<&str>,
    policy: &DocumentationPolicy,
) -> GuardResult {
    if !edge.requires_documentation
        || has_required_documentation
        || notes_are_detailed(notes, policy.min_notes_length)
    {
        return Ok(());
    }

    Err(GuardRejection::new(
        RejectionKind::MissingDocumentation,
        format!(
            "Transition {} -> {} requires documentation",
            edge.from, edge.to
        ),
        Some(vec![
            "Attach the required documentation to the claim".to_string(),
            format!(
                "Or provide detailed notes of at least {} characters",
                policy.min_notes_length
            ),
        ]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ClaimState::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap()
    }

    fn edge(from: ClaimState, to: ClaimState) -> TransitionEdge {
        TransitionTable::standard()
            .edge_requirements(from, to)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_check_reachable_existing_edge() {
        let table = TransitionTable::standard();
        let found = check_reachable(&table, Investigation, Resolved).unwrap();
        assert_eq!(found.min_hours, 72);
    }

    #[test]
    fn test_check_reachable_missing_edge() {
        let table = TransitionTable::standard();
        let rejection = check_reachable(&table, Submitted, Closed).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::InvalidTransition);
        assert!(rejection.reason.contains("Invalid transition"));
        assert!(rejection.reason.contains("under_review, assigned, rejected"));
        assert!(rejection.required_actions.is_none());
    }

    #[test]
    fn test_check_reachable_from_terminal() {
        let table = TransitionTable::standard();
        let rejection = check_reachable(&table, Closed, Submitted).unwrap_err();
        assert!(rejection.reason.contains("terminal state"));
    }

    #[test]
    fn test_check_role() {
        let close = edge(Resolved, Closed);
        assert!(check_role(&close, Role::Admin).is_ok());
        assert!(check_role(&close, Role::System).is_ok());

        let rejection = check_role(&close, Role::Steward).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::UnauthorizedRole);
        assert!(rejection.reason.contains("User role 'steward'"));
        assert!(rejection.reason.contains("not authorized"));
        let actions = rejection.required_actions.unwrap();
        assert!(actions[0].contains("admin role"));
    }

    #[test]
    fn test_check_role_suggests_minimum_role() {
        let review = edge(Submitted, UnderReview);
        let rejection = check_role(&review, Role::Member).unwrap_err();
        let actions = rejection.required_actions.unwrap();
        assert!(actions[0].contains("at least the steward role"));
        assert_eq!(actions[1], "Authorized roles: steward, admin");
    }

    #[test]
    fn test_check_dwell_time_boundary() {
        let e = edge(UnderReview, Investigation);
        assert!(check_dwell_time(&e, now() - Duration::hours(24), now()).is_ok());
        assert!(check_dwell_time(&e, now() - Duration::hours(25), now()).is_ok());

        let just_short = now() - Duration::hours(24) + Duration::milliseconds(1);
        let rejection = check_dwell_time(&e, just_short, now()).unwrap_err();
        assert!(rejection.reason.contains("1 hours remaining"));
    }

    #[test]
    fn test_check_dwell_time_rounds_remaining_up() {
        let e = edge(UnderReview, Investigation);
        let rejection =
            check_dwell_time(&e, now() - Duration::minutes(12 * 60 + 30), now()).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::InsufficientDwellTime);
        assert!(rejection.reason.contains("minimum duration"));
        assert!(rejection.reason.contains("12 hours remaining"));
    }

    #[test]
    fn test_check_dwell_time_future_timestamp_counts_as_zero() {
        let e = edge(Resolved, Closed);
        let rejection = check_dwell_time(&e, now() + Duration::hours(5), now()).unwrap_err();
        assert!(rejection.reason.contains("168 hours remaining"));
        assert_eq!(dwell_millis(now() + Duration::hours(5), now()), 0);
    }

    #[test]
    fn test_check_dwell_time_no_minimum() {
        let e = edge(Submitted, UnderReview);
        assert!(check_dwell_time(&e, now(), now()).is_ok());
    }

    #[test]
    fn test_check_critical_signals() {
        assert!(check_critical_signals(Closed, false).is_ok());
        assert!(check_critical_signals(Resolved, true).is_ok());

        let rejection = check_critical_signals(Closed, true).unwrap_err();
        assert!(rejection.reason.contains("critical signals"));
        assert!(rejection
            .required_actions
            .unwrap()
            .contains(&RESOLVE_CRITICAL_SIGNALS.to_string()));
    }

    #[test]
    fn test_notes_are_detailed() {
        assert!(!notes_are_detailed(None, 50));
        assert!(!notes_are_detailed(Some(""), 0));
        assert!(!notes_are_detailed(Some("   "), 0));
        assert!(!notes_are_detailed(Some("Looks fine"), 50));
        assert!(notes_are_detailed(
            Some("Comprehensive investigation notes with findings and resolution details..."),
            50
        ));
        // Padding does not count
        assert!(!notes_are_detailed(Some(format!("  {}  ", "x".repeat(49)).as_str()), 50));
        assert!(notes_are_detailed(Some("ok"), 0));
    }

    #[test]
    fn test_check_documentation() {
        let policy = DocumentationPolicy::default();
        let resolve = edge(Investigation, Resolved);

        assert!(check_documentation(&resolve, true, None, &policy).is_ok());
        assert!(check_documentation(
            &resolve,
            false,
            Some("Detailed investigation findings: member complaint was valid, employer agreed to remedy..."),
            &policy
        )
        .is_ok());

        let rejection = check_documentation(&resolve, false, Some("done"), &policy).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::MissingDocumentation);
        assert!(rejection.reason.contains("documentation"));
        assert!(rejection.required_actions.is_some());
    }

    #[test]
    fn test_check_documentation_not_required() {
        let policy = DocumentationPolicy::default();
        let review = edge(UnderReview, Investigation);
        assert!(check_documentation(&review, false, None, &policy).is_ok());
    }

    #[test]
    fn test_rejection_into_decision() {
        let decision: TransitionDecision = check_critical_signals(Closed, true).unwrap_err().into();
        assert!(!decision.allowed);
        assert_eq!(decision.rejection, Some(RejectionKind::UnresolvedCriticalSignals));
        assert!(decision.requires_action(RESOLVE_CRITICAL_SIGNALS));
    }
}
