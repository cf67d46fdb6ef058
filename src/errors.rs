//! Error types for claimguard
//!
//! Business-rule rejections are never errors: they come back as a
//! `TransitionDecision` with `allowed == false`. The variants here cover
//! malformed input and integration faults, each with a stable code for
//! programmatic handling.

use thiserror::Error;

/// Result type alias for claimguard operations
pub type Result<T> = std::result::Result<T, ClaimGuardError>;

/// Main error type for all claimguard operations
#[derive(Debug, Error)]
pub enum ClaimGuardError {
    /// A claim state string did not name a known state
    #[error("Unknown claim state: {0}")]
    UnknownState(String),

    /// A role string did not name a known role
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A priority string did not name a known priority
    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    /// The transition context is missing required data
    #[error("Malformed transition context: {0}")]
    MalformedContext(String),

    /// The requested edge does not exist in the transition table
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A transition table violates its structural invariants
    #[error("Invalid transition table: {0}")]
    InvalidTable(String),

    /// Guard policy values are out of range
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClaimGuardError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            ClaimGuardError::UnknownState(_) => "UNKNOWN_STATE",
            ClaimGuardError::UnknownRole(_) => "UNKNOWN_ROLE",
            ClaimGuardError::UnknownPriority(_) => "UNKNOWN_PRIORITY",
            ClaimGuardError::MalformedContext(_) => "MALFORMED_CONTEXT",
            ClaimGuardError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ClaimGuardError::InvalidTable(_) => "INVALID_TABLE",
            ClaimGuardError::InvalidPolicy(_) => "INVALID_POLICY",
            ClaimGuardError::InvalidJson(_) => "INVALID_JSON",
            ClaimGuardError::FileNotFound(_) => "FILE_NOT_FOUND",
            ClaimGuardError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &ClaimGuardError) -> i32 {
    match error {
        // Usage errors: the caller handed us something we cannot parse
        ClaimGuardError::UnknownState(_)
        | ClaimGuardError::UnknownRole(_)
        | ClaimGuardError::UnknownPriority(_)
        | ClaimGuardError::MalformedContext(_)
        | ClaimGuardError::InvalidJson(_) => 64,
        _ => 1,
    }
}
