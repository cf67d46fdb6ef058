//! SLA evaluation for the time a claim has spent in its current state
//!
//! Advisory only: the result is attached to allowed decisions and never
//! blocks a transition.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::schemas::{Priority, SlaMetadata, SlaPolicy, SlaStatus};

use super::validation::dwell_millis;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// SLA verdict for one claim at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaAssessment {
    pub status: SlaStatus,

    /// False only when the deadline has passed
    pub compliant: bool,

    /// Starts with "SLA BREACH" or "SLA AT RISK"; `None` when comfortably
    /// inside the window
    pub warning: Option<String>,

    pub deadline: DateTime<Utc>,

    /// Whole days before the deadline, or negative whole days (rounded up)
    /// past it
    pub days_remaining: i64,
}

impl SlaAssessment {
    pub fn metadata(&self) -> SlaMetadata {
        SlaMetadata {
            sla_compliant: self.compliant,
            sla_status: self.status,
            sla_deadline: self.deadline,
            days_remaining: self.days_remaining,
        }
    }
}

/// Classify the dwell time of a claim against its priority's SLA window.
pub fn evaluate_sla(
    policy: &SlaPolicy,
    priority: Priority,
    status_changed_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> SlaAssessment {
    let window_ms = policy.window_millis(priority);
    let deadline = status_changed_at
        .checked_add_signed(Duration::milliseconds(window_ms))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let deadline_text = deadline.to_rfc3339_opts(SecondsFormat::Secs, true);
    let window_days = policy.window_days(priority);

    if now > deadline {
        let overdue_ms = now.signed_duration_since(deadline).num_milliseconds();
        let overdue_days = (overdue_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
        return SlaAssessment {
            status: SlaStatus::Breached,
            compliant: false,
            warning: Some(format!(
                "SLA BREACH: {} priority claim is {} day(s) past its {:.1}-day SLA deadline ({})",
                priority, overdue_days, window_days, deadline_text
            )),
            deadline,
            days_remaining: -overdue_days,
        };
    }

    let remaining_ms = deadline.signed_duration_since(now).num_milliseconds();
    let days_remaining = remaining_ms / MILLIS_PER_DAY;
    let elapsed_ms = dwell_millis(status_changed_at, now);
    let at_risk =
        i128::from(elapsed_ms) * 100 >= i128::from(window_ms) * i128::from(policy.at_risk_percent);

    if at_risk {
        return SlaAssessment {
            status: SlaStatus::AtRisk,
            compliant: true,
            warning: Some(format!(
                "SLA AT RISK: {} day(s) remaining in the {:.1}-day SLA window for {} priority (deadline {})",
                days_remaining, window_days, priority, deadline_text
            )),
            deadline,
            days_remaining,
        };
    }

    SlaAssessment {
        status: SlaStatus::Compliant,
        compliant: true,
        warning: None,
        deadline,
        days_remaining,
    }
}
