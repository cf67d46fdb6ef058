//! Schema types for claimguard
//!
//! Every type serializes with snake_case field names so callers can move
//! contexts and decisions across an API boundary as JSON.

mod claim;
mod context;
mod decision;
mod policy;

pub use claim::{Claim, ClaimState, Priority, Role};
pub use context::TransitionContext;
pub use decision::{RejectionKind, SlaMetadata, SlaStatus, TransitionDecision};
pub use policy::{DocumentationPolicy, GuardPolicy, SlaBaseDays, SlaMultipliers, SlaPolicy};
