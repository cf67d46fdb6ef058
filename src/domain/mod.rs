//! Domain logic for claim workflow transitions

mod engine;
mod sla;
mod states;
mod table;
mod transitions;
mod validation;


pub use engine::TransitionGuard;
pub use sla::{evaluate_sla, SlaAssessment};
pub use states::{is_terminal_state, minimum_role, CLAIM_STATES, ROLES};
pub use table::{TransitionEdge, TransitionTable};
pub use transitions::{apply_claim_transition, TransitionRecord, TransitionRequest, TransitionResult};
pub use validation::{
    check_critical_signals, check_documentation, check_dwell_time, check_reachable, check_role,
    dwell_millis, notes_are_detailed, GuardRejection, GuardResult, RESOLVE_CRITICAL_SIGNALS,
};
