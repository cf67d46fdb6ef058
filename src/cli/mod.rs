//! CLI module for claimguard
//!
//! Provides the command-line interface using clap.

pub mod commands;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::errors::{ClaimGuardError, Result};
use crate::schemas::{ClaimState, Role};

/// claimguard - check grievance claim transitions against the workflow rules
#[derive(Parser, Debug)]
#[command(name = "claimguard")]
#[command(version)]
#[command(about = "Check grievance claim transitions against the workflow rules")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Policy file (JSON) overriding SLA and documentation defaults
    #[arg(long, global = true)]
    pub policy: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a transition context and print the decision as JSON
    Validate {
        /// Path to a JSON transition context, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        context: PathBuf,

        /// Evaluate as of this instant (RFC 3339) instead of the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// List the states a role may move a claim to
    Allowed {
        /// Current claim state
        state: ClaimState,

        /// Requester role (member, steward, admin, system)
        #[arg(short, long)]
        role: Role,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the requirements of a single transition
    Requirements {
        /// Source state
        from: ClaimState,

        /// Target state
        to: ClaimState,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every edge of the workflow graph
    Graph {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective guard policy as JSON
    Policy,
}

/// Pretty-print a value as JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ClaimGuardError::InvalidJson(e.to_string()))
}
