//! claimguard - transition guards for grievance claim workflows
//!
//! This library decides whether a claim may move from one workflow state to
//! another, including:
//! - Schema definitions for claims, transition contexts, decisions, and policy
//! - The workflow graph with per-edge role, dwell, and documentation rules
//! - The guard pipeline and SLA evaluation
//! - Applying an allowed transition to a claim record
//! - JSON input helpers and policy loading for the CLI

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;

// Re-export commonly used types
pub use domain::{apply_claim_transition, TransitionGuard, TransitionTable};
pub use errors::{ClaimGuardError, Result};
pub use schemas::{
    Claim, ClaimState, GuardPolicy, Priority, Role, TransitionContext, TransitionDecision,
};
