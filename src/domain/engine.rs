//! Transition guard engine
//!
//! Runs the guards in a fixed order and stops at the first failure:
//!
//! 1. graph legality
//! 2. role authorization (`system` bypasses the role table)
//! 3. minimum dwell time
//! 4. unresolved critical signals (closing only)
//! 5. documentation
//!
//! Only when every guard passes is the SLA evaluated, and its verdict is
//! attached to the allowed decision as warnings and metadata.
//!
//! The engine owns immutable data only, so a single instance can be shared
//! across threads without locking.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::schemas::{ClaimState, GuardPolicy, Role, SlaStatus, TransitionContext, TransitionDecision};

use super::sla::evaluate_sla;
use super::table::{TransitionEdge, TransitionTable};
use super::validation::{
    check_critical_signals, check_documentation, check_dwell_time, check_reachable, check_role,
    GuardResult,
};

/// Stateless transition guard over a fixed table and policy
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionGuard {
    table: TransitionTable,
    policy: GuardPolicy,
}

impl TransitionGuard {
    /// Create a guard, rejecting out-of-range policy values.
    pub fn new(table: TransitionTable, policy: GuardPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(TransitionGuard { table, policy })
    }

    /// The standard workflow with default policy.
    pub fn standard() -> Self {
        TransitionGuard {
            table: TransitionTable::standard(),
            policy: GuardPolicy::default(),
        }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Decide whether `ctx` may proceed, as of `now`.
    ///
    /// Business-rule failures come back as `Ok` decisions with
    /// `allowed == false`; only a malformed context is an `Err`.
    pub fn validate_transition(
        &self,
        ctx: &TransitionContext,
        now: DateTime<Utc>,
    ) -> Result<TransitionDecision> {
        ctx.ensure_well_formed()?;

        let decision = match self.run_guards(ctx, now) {
            Ok(()) => self.allow(ctx, now),
            Err(rejection) => TransitionDecision::from(rejection),
        };

        debug!(
            claim_id = %ctx.claim_id,
            from = %ctx.current_state,
            to = %ctx.target_state,
            role = %ctx.requester_role,
            allowed = decision.allowed,
            rejection = ?decision.rejection,
            "transition evaluated"
        );
        Ok(decision)
    }

    /// [`validate_transition`](Self::validate_transition) against the
    /// current wall clock, read once.
    pub fn validate_transition_now(&self, ctx: &TransitionContext) -> Result<TransitionDecision> {
        self.validate_transition(ctx, Utc::now())
    }

    fn run_guards(&self, ctx: &TransitionContext, now: DateTime<Utc>) -> GuardResult {
        let edge = check_reachable(&self.table, ctx.current_state, ctx.target_state)?;
        check_role(edge, ctx.requester_role)?;
        check_dwell_time(edge, ctx.status_changed_at, now)?;
        check_critical_signals(ctx.target_state, ctx.has_unresolved_critical_signals)?;
        check_documentation(
            edge,
            ctx.has_required_documentation,
            ctx.notes.as_deref(),
            &self.policy.documentation,
        )
    }

    fn allow(&self, ctx: &TransitionContext, now: DateTime<Utc>) -> TransitionDecision {
        let sla = evaluate_sla(&self.policy.sla, ctx.priority, ctx.status_changed_at, now);
        if sla.status == SlaStatus::Breached {
            warn!(
                claim_id = %ctx.claim_id,
                priority = %ctx.priority,
                days_overdue = -sla.days_remaining,
                "transition allowed on a claim past its SLA deadline"
            );
        }
        TransitionDecision::allow(sla.metadata(), sla.warning)
    }

    /// Targets reachable from `current` that `role` may take.
    ///
    /// Empty for `closed` and for roles without any authorized edge out of
    /// `current`. Ignores dwell time, documentation and signals.
    pub fn allowed_transitions(&self, current: ClaimState, role: Role) -> Vec<ClaimState> {
        self.table
            .edges_from(current)
            .iter()
            .filter(|edge| edge.permits(role))
            .map(|edge| edge.to)
            .collect()
    }

    /// Requirements of the edge `from -> to`, if it exists.
    pub fn transition_requirements(
        &self,
        from: ClaimState,
        to: ClaimState,
    ) -> Option<&TransitionEdge> {
        self.table.edge_requirements(from, to)
    }
}

impl Default for TransitionGuard {
    fn default() -> Self {
        Self::standard()
    }
}
