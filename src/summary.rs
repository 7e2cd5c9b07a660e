//! Derived statistics rendered by both surfaces

use serde::Serialize;

use crate::history::{OrderHistory, RateBand, CAPACITY};

/// What the fall-off line should say
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "orders", rename_all = "snake_case")]
pub enum FallOffStatus {
    NoOrders,
    NoDeclines,
    NeedMoreOrders,
    NextOrder,
    InOrders(usize),
}

impl FallOffStatus {
    pub fn message(&self) -> String {
        match self {
            FallOffStatus::NoOrders => "No orders tracked yet".to_string(),
            FallOffStatus::NoDeclines => "Perfect! No declines in your history".to_string(),
            FallOffStatus::NeedMoreOrders => {
                "Track more orders to see when declines fall off".to_string()
            }
            FallOffStatus::NextOrder => {
                "Next decline will fall off with your next order!".to_string()
            }
            FallOffStatus::InOrders(n) => format!("Next decline falls off in {} orders", n),
        }
    }
}

/// Snapshot of the history statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub capacity: usize,
    pub accepted: usize,
    pub declined: usize,
    pub acceptance_rate: f64,
    pub band: RateBand,
    pub fall_off_countdown: Option<usize>,
    pub fall_off: FallOffStatus,
}

impl HistorySummary {
    pub fn new(history: &OrderHistory) -> Self {
        let accepted = history.accepted_count();
        let declined = history.len() - accepted;
        let acceptance_rate = history.acceptance_rate();
        let fall_off_countdown = history.fall_off_countdown();

        let fall_off = if history.is_empty() {
            FallOffStatus::NoOrders
        } else if declined == 0 {
            FallOffStatus::NoDeclines
        } else {
            match fall_off_countdown {
                None => FallOffStatus::NeedMoreOrders,
                Some(1) => FallOffStatus::NextOrder,
                Some(n) => FallOffStatus::InOrders(n),
            }
        };

        Self {
            total: history.len(),
            capacity: CAPACITY,
            accepted,
            declined,
            acceptance_rate,
            band: RateBand::classify(acceptance_rate),
            fall_off_countdown,
            fall_off,
        }
    }

    /// Rate as displayed, e.g. `"75.0%"`; an empty history shows `"0%"`
    pub fn rate_text(&self) -> String {
        if self.total == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.acceptance_rate)
        }
    }
}

impl From<&OrderHistory> for HistorySummary {
    fn from(history: &OrderHistory) -> Self {
        Self::new(history)
    }
}
