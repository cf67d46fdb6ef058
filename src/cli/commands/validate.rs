//! Validate command - decide a single transition context

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::cli::to_json;
use crate::domain::TransitionGuard;
use crate::errors::Result;
use crate::fs;
use crate::schemas::{TransitionContext, TransitionDecision};

/// Read a context from `context` (or `input` for "-") and decide it.
pub fn decide<R: Read>(
    guard: &TransitionGuard,
    context: &Path,
    input: R,
    now: DateTime<Utc>,
) -> Result<TransitionDecision> {
    let ctx: TransitionContext = fs::read_json_input(context, input)?;
    let decision = guard.validate_transition(&ctx, now)?;
    info!(
        claim_id = %ctx.claim_id,
        from = %ctx.current_state,
        to = %ctx.target_state,
        allowed = decision.allowed,
        "decision"
    );
    Ok(decision)
}

/// Print the decision as JSON and report whether the transition is allowed.
pub fn run(guard: &TransitionGuard, context: &Path, now: Option<DateTime<Utc>>) -> Result<bool> {
    let now = now.unwrap_or_else(Utc::now);
    let decision = decide(guard, context, std::io::stdin().lock(), now)?;
    println!("{}", to_json(&decision)?);
    Ok(decision.allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_decide_from_reader() {
        let input = r#"{
            "claim_id": "claim_123",
            "current_state": "under_review",
            "target_state": "investigation",
            "requester_id": "steward_456",
            "requester_role": "steward",
            "priority": "medium",
            "status_changed_at": "2026-03-20T00:00:00Z"
        }"#;
        let decision = decide(
            &TransitionGuard::standard(),
            Path::new("-"),
            input.as_bytes(),
            now(),
        )
        .unwrap();
        assert!(!decision.allowed);
        assert!(decision.reason.unwrap().contains("12 hours remaining"));
    }

    #[test]
    fn test_decide_rejects_unknown_state() {
        let input = r#"{
            "claim_id": "claim_123",
            "current_state": "closed",
            "target_state": "reopened",
            "requester_id": "admin_1",
            "requester_role": "admin",
            "priority": "medium",
            "status_changed_at": "2026-03-20T00:00:00Z"
        }"#;
        let err = decide(
            &TransitionGuard::standard(),
            Path::new("-"),
            input.as_bytes(),
            now(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");
    }
}
