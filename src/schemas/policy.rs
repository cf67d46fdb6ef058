//! Policy schema - tunable constants for SLA evaluation and documentation checks

use serde::{Deserialize, Serialize};

use crate::errors::{ClaimGuardError, Result};

use super::claim::Priority;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Base SLA window in days, per priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaBaseDays {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for SlaBaseDays {
    fn default() -> Self {
        SlaBaseDays {
            low: 15,
            medium: 10,
            high: 10,
            critical: 10,
        }
    }
}

impl SlaBaseDays {
    pub fn get(&self, priority: Priority) -> u32 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Critical => self.critical,
        }
    }
}

/// Scale applied to the base window, per priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for SlaMultipliers {
    fn default() -> Self {
        SlaMultipliers {
            low: 1.0,
            medium: 1.0,
            high: 0.75,
            critical: 0.5,
        }
    }
}

impl SlaMultipliers {
    pub fn get(&self, priority: Priority) -> f64 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Critical => self.critical,
        }
    }
}

/// SLA evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaPolicy {
    #[serde(default)]
    pub base_days: SlaBaseDays,

    #[serde(default)]
    pub multipliers: SlaMultipliers,

    /// Share of the window (in percent) after which a claim is "at risk"
    #[serde(default = "default_at_risk_percent")]
    pub at_risk_percent: u32,
}

fn default_at_risk_percent() -> u32 {
    90
}

impl Default for SlaPolicy {
    fn default() -> Self {
        SlaPolicy {
            base_days: SlaBaseDays::default(),
            multipliers: SlaMultipliers::default(),
            at_risk_percent: 90,
        }
    }
}

impl SlaPolicy {
    /// Effective SLA window for `priority`, in milliseconds
    pub fn window_millis(&self, priority: Priority) -> i64 {
        let days = f64::from(self.base_days.get(priority)) * self.multipliers.get(priority);
        (days * MILLIS_PER_DAY).round() as i64
    }

    /// Effective SLA window for `priority`, in (possibly fractional) days
    pub fn window_days(&self, priority: Priority) -> f64 {
        self.window_millis(priority) as f64 / MILLIS_PER_DAY
    }
}

/// Documentation guard settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationPolicy {
    /// Minimum trimmed length (in characters) for notes to stand in for
    /// formal documentation
    #[serde(default = "default_min_notes_length")]
    pub min_notes_length: usize,
}

fn default_min_notes_length() -> usize {
    50
}

impl Default for DocumentationPolicy {
    fn default() -> Self {
        DocumentationPolicy {
            min_notes_length: 50,
        }
    }
}

/// All tunable guard settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuardPolicy {
    #[serde(default)]
    pub sla: SlaPolicy,

    #[serde(default)]
    pub documentation: DocumentationPolicy,
}

impl GuardPolicy {
    /// Check that every value yields a usable policy
    pub fn validate(&self) -> Result<()> {
        for priority in [Priority::Low, Priority::Medium, Priority::High, Priority::Critical] {
            let base = self.sla.base_days.get(priority);
            if base == 0 {
                return Err(ClaimGuardError::InvalidPolicy(format!(
                    "sla.base_days.{} must be greater than zero",
                    priority
                )));
            }
            let multiplier = self.sla.multipliers.get(priority);
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ClaimGuardError::InvalidPolicy(format!(
                    "sla.multipliers.{} must be a positive number, got {}",
                    priority, multiplier
                )));
            }
            if self.sla.window_millis(priority) <= 0 {
                return Err(ClaimGuardError::InvalidPolicy(format!(
                    "SLA window for {} priority rounds to zero",
                    priority
                )));
            }
        }
        if !(1..=100).contains(&self.sla.at_risk_percent) {
            return Err(ClaimGuardError::InvalidPolicy(format!(
                "sla.at_risk_percent must be between 1 and 100, got {}",
                self.sla.at_risk_percent
            )));
        }
        Ok(())
    }
}
