//! Rolling order history
//!
//! Provides:
//! - A bounded FIFO window of the last 100 decisions
//! - Acceptance-rate statistic and its low/medium/high banding
//! - Prediction of when the oldest decline falls out of the window
//! - The persisted comma-separated codec (see [`codec`])

pub mod codec;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::Decision;

pub use codec::{decode, encode};

/// Number of decisions kept in the rolling window
pub const CAPACITY: usize = 100;

/// Ordered window of past decisions, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderHistory {
    entries: VecDeque<Decision>,
}

impl OrderHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(CAPACITY),
        }
    }

    /// Build a history from decisions ordered oldest first.
    ///
    /// If more than [`CAPACITY`] decisions are supplied only the newest
    /// ones are kept.
    pub fn from_decisions<I>(decisions: I) -> Self
    where
        I: IntoIterator<Item = Decision>,
    {
        let mut history = Self::new();
        for decision in decisions {
            history.record_decision(decision);
        }
        history
    }

    /// Append a decision, evicting the oldest entry first when the window is full.
    ///
    /// Returns the evicted decision, if any.
    pub fn record_decision(&mut self, decision: Decision) -> Option<Decision> {
        let evicted = if self.entries.len() >= CAPACITY {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(decision);
        evicted
    }

    /// Drop every entry
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the next insertion is guaranteed to evict an entry
    pub fn is_full(&self) -> bool {
        self.entries.len() >= CAPACITY
    }

    pub fn accepted_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_accepted()).count()
    }

    pub fn declined_count(&self) -> usize {
        self.entries.len() - self.accepted_count()
    }

    /// Percentage of accepted decisions in the window, `0.0` when empty
    pub fn acceptance_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        (self.accepted_count() as f64 * 100.0) / self.entries.len() as f64
    }

    /// Number of further decisions after which the oldest decline is evicted.
    ///
    /// Only defined when the window is full and holds at least one decline.
    pub fn fall_off_countdown(&self) -> Option<usize> {
        if !self.is_full() {
            return None;
        }
        self.entries
            .iter()
            .position(|d| d.is_declined())
            .map(|index| index + 1)
    }

    /// The `count` oldest decisions, i.e. the next ones to leave the window
    pub fn next_to_fall_off(&self, count: usize) -> impl Iterator<Item = Decision> + '_ {
        self.entries.iter().copied().take(count)
    }

    /// Iterate oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Decision> + ExactSizeIterator + '_ {
        self.entries.iter().copied()
    }

    /// Iterate newest first
    pub fn iter_newest_first(&self) -> impl Iterator<Item = Decision> + '_ {
        self.entries.iter().rev().copied()
    }

    /// Decision at `index` counted from the oldest end
    pub fn get(&self, index: usize) -> Option<Decision> {
        self.entries.get(index).copied()
    }
}

impl FromIterator<Decision> for OrderHistory {
    fn from_iter<I: IntoIterator<Item = Decision>>(iter: I) -> Self {
        Self::from_decisions(iter)
    }
}

/// Acceptance-rate classification used by both surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBand {
    Low,
    Medium,
    High,
}

impl RateBand {
    pub const MEDIUM_THRESHOLD: f64 = 50.0;
    pub const HIGH_THRESHOLD: f64 = 70.0;

    pub fn classify(rate: f64) -> Self {
        if rate < Self::MEDIUM_THRESHOLD {
            RateBand::Low
        } else if rate < Self::HIGH_THRESHOLD {
            RateBand::Medium
        } else {
            RateBand::High
        }
    }
}

impl std::fmt::Display for RateBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateBand::Low => write!(f, "low"),
            RateBand::Medium => write!(f, "medium"),
            RateBand::High => write!(f, "high"),
        }
    }
}
