//! Shared types used across modules
//!
//! This module contains types that are used by the history model,
//! the codec and both presentation surfaces.

use serde::{Deserialize, Serialize};

/// Outcome of a single offered order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Declined,
}

impl Decision {
    /// Persisted marker for this decision
    pub fn marker(&self) -> &'static str {
        match self {
            Decision::Accepted => "1",
            Decision::Declined => "0",
        }
    }

    /// Parse a persisted marker.
    ///
    /// Only the literal `"1"` counts as an acceptance; every other token is
    /// read back as a decline.
    pub fn from_marker(token: &str) -> Self {
        if token == "1" {
            Decision::Accepted
        } else {
            Decision::Declined
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }

    pub fn is_declined(&self) -> bool {
        !self.is_accepted()
    }

    /// Short label shown in the history panel
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Accepted => "Accept",
            Decision::Declined => "Decline",
        }
    }

    /// One-line confirmation shown after the decision is recorded
    pub fn notification(&self) -> &'static str {
        match self {
            Decision::Accepted => "✓ Accepted",
            Decision::Declined => "✗ Declined",
        }
    }
}

impl From<bool> for Decision {
    fn from(accepted: bool) -> Self {
        if accepted {
            Decision::Accepted
        } else {
            Decision::Declined
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_accepted()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Accepted => write!(f, "Accepted"),
            Decision::Declined => write!(f, "Declined"),
        }
    }
}
