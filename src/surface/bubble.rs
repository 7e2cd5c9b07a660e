//! Floating bubble surface
//!
//! A compact view that is either collapsed to a single marker or expanded
//! to show the acceptance rate with accept/decline keys. It starts
//! expanded, like the overlay it stands in for.

use anyhow::{Context, Result};

use super::{band_color, dim, paint, Handoff};
use crate::config::DisplayConfig;
use crate::history::OrderHistory;
use crate::storage::KeyValueStore;
use crate::store::OrderHistoryStore;
use crate::summary::HistorySummary;
use crate::types::Decision;

/// Visual state of the bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BubbleState {
    Collapsed,
    #[default]
    Expanded,
}

/// Input the bubble reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleEvent {
    Tap,
    Minimize,
    Maximize,
    Close,
    Accept,
    Decline,
}

impl BubbleEvent {
    /// Map a key typed at the bubble prompt; an empty line is a tap
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "t" | "tap" => Some(BubbleEvent::Tap),
            "a" | "accept" => Some(BubbleEvent::Accept),
            "d" | "decline" => Some(BubbleEvent::Decline),
            "m" | "minimize" => Some(BubbleEvent::Minimize),
            "o" | "open" | "maximize" => Some(BubbleEvent::Maximize),
            "q" | "close" | "quit" => Some(BubbleEvent::Close),
            _ => None,
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleAction {
    None,
    Record(Decision),
    Handoff(Handoff),
}

impl BubbleState {
    /// Process an event and return the new state with the action to perform
    pub fn on_event(self, event: BubbleEvent) -> (BubbleState, BubbleAction) {
        match (self, event) {
            (_, BubbleEvent::Close) => (self, BubbleAction::Handoff(Handoff::Exit)),

            (BubbleState::Collapsed, BubbleEvent::Tap) => (BubbleState::Expanded, BubbleAction::None),

            (BubbleState::Expanded, BubbleEvent::Minimize) => {
                (BubbleState::Collapsed, BubbleAction::None)
            }
            (BubbleState::Expanded, BubbleEvent::Maximize) => {
                (self, BubbleAction::Handoff(Handoff::Dashboard))
            }
            (BubbleState::Expanded, BubbleEvent::Accept) => {
                (self, BubbleAction::Record(Decision::Accepted))
            }
            (BubbleState::Expanded, BubbleEvent::Decline) => {
                (self, BubbleAction::Record(Decision::Declined))
            }

            // The collapsed marker only responds to taps
            (state, _) => (state, BubbleAction::None),
        }
    }
}

/// Bubble surface bound to a store
pub struct Bubble<'a, S: KeyValueStore> {
    store: &'a mut OrderHistoryStore<S>,
    history: OrderHistory,
    state: BubbleState,
    display: DisplayConfig,
    notification: Option<&'static str>,
}

impl<'a, S: KeyValueStore> Bubble<'a, S> {
    /// Activate the bubble, loading the persisted history
    pub fn activate(store: &'a mut OrderHistoryStore<S>, display: DisplayConfig) -> Result<Self> {
        let history = store.load().context("Failed to load order history")?;
        Ok(Self {
            store,
            history,
            state: BubbleState::default(),
            display,
            notification: None,
        })
    }

    pub fn state(&self) -> BubbleState {
        self.state
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    /// Apply an event; returns a handoff when the bubble should end
    pub fn handle(&mut self, event: BubbleEvent) -> Result<Option<Handoff>> {
        let (next, action) = self.state.on_event(event);
        self.state = next;
        self.notification = None;

        match action {
            BubbleAction::None => Ok(None),
            BubbleAction::Record(decision) => {
                self.store.record_decision(&mut self.history, decision)?;
                self.notification = Some(decision.notification());
                Ok(None)
            }
            BubbleAction::Handoff(handoff) => Ok(Some(handoff)),
        }
    }

    /// Single-line rendering of the current state
    pub fn render(&self) -> String {
        let color = self.display.color;
        match self.state {
            BubbleState::Collapsed => {
                format!("(◉)  {}", dim("t expand · q close", color))
            }
            BubbleState::Expanded => {
                let summary = HistorySummary::from(&self.history);
                let rate = paint(&summary.rate_text(), band_color(summary.band), color);
                let mut line = format!(
                    "[ AR {} ]  {}",
                    rate,
                    dim("a accept · d decline · m minimize · o open · q close", color)
                );
                if let Some(note) = self.notification {
                    line.push_str("\n  ");
                    line.push_str(note);
                }
                line
            }
        }
    }

    /// Interactive loop
    pub fn run(mut self) -> Result<Handoff> {
        let mut rl = rustyline::DefaultEditor::new()
            .context("Failed to initialise line editor")?;

        loop {
            println!("{}", self.render());
            match rl.readline("bubble> ") {
                Ok(line) => match BubbleEvent::parse(&line) {
                    Some(event) => {
                        if let Some(handoff) = self.handle(event)? {
                            return Ok(handoff);
                        }
                    }
                    None => println!("Unknown key '{}'", line.trim()),
                },
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => return Ok(Handoff::Exit),
                Err(err) => return Err(err).context("Failed to read input"),
            }
        }
    }
}
