//! Full dashboard surface

use anyhow::{Context, Result};
use crossterm::style::Color;

use super::{confirm, dim, paint, band_color, Handoff, ACCEPT_COLOR, DECLINE_COLOR};
use crate::config::DisplayConfig;
use crate::history::OrderHistory;
use crate::storage::KeyValueStore;
use crate::store::OrderHistoryStore;
use crate::summary::HistorySummary;
use crate::types::Decision;

const CELL: &str = "■";

/// Which history panel the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPanel {
    /// The oldest few entries, next in line to leave the window
    #[default]
    NextToFallOff,
    /// Every entry as a grid, newest first
    Full,
}

impl HistoryPanel {
    pub fn toggled(self) -> Self {
        match self {
            HistoryPanel::NextToFallOff => HistoryPanel::Full,
            HistoryPanel::Full => HistoryPanel::NextToFallOff,
        }
    }
}

/// Rate, counts and fall-off line
pub fn render_summary(summary: &HistorySummary, display: &DisplayConfig) -> String {
    let color = display.color;
    let mut out = String::new();

    out.push_str(&format!(
        "Acceptance rate: {}\n",
        paint(&summary.rate_text(), band_color(summary.band), color)
    ));
    out.push_str(&format!(
        "Total: {}   Accepted: {}   Declined: {}\n",
        summary.total, summary.accepted, summary.declined
    ));
    out.push_str(&summary.fall_off.message());
    out.push('\n');
    out
}

/// The next entries to leave the window, oldest first
pub fn render_next_to_fall_off(history: &OrderHistory, display: &DisplayConfig) -> String {
    let color = display.color;
    let mut out = format!(
        "Next {} Orders to Fall Off\n",
        display.preview_count
    );

    if history.is_empty() {
        out.push_str(&dim("  No orders to display\n", color));
        return out;
    }

    for (i, decision) in history.next_to_fall_off(display.preview_count).enumerate() {
        let tint = decision_color(decision);
        out.push_str(&format!(
            "  {:>2}  {} {}\n",
            i + 1,
            paint("●", tint, color),
            paint(decision.label(), tint, color)
        ));
    }
    out
}

/// Every entry as a grid, newest first
pub fn render_full_history(history: &OrderHistory, display: &DisplayConfig) -> String {
    let color = display.color;
    let mut out = String::from("Full Order History\n");

    if history.is_empty() {
        out.push_str(&dim("  No orders to display\n", color));
        return out;
    }

    let columns = display.grid_columns.max(1);
    let cells: Vec<String> = history
        .iter_newest_first()
        .map(|d| paint(CELL, decision_color(d), color))
        .collect();

    for row in cells.chunks(columns) {
        out.push_str("  ");
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    out.push_str(&format!(
        "\n  {} Accept  |  {} Decline\n",
        paint(CELL, ACCEPT_COLOR, color),
        paint(CELL, DECLINE_COLOR, color)
    ));
    out
}

fn decision_color(decision: Decision) -> Color {
    match decision {
        Decision::Accepted => ACCEPT_COLOR,
        Decision::Declined => DECLINE_COLOR,
    }
}

/// Dashboard commands read from the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    Record(Decision),
    TogglePanel,
    Reset,
    Float,
    Help,
    Quit,
}

impl DashboardCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "a" | "accept" => Some(DashboardCommand::Record(Decision::Accepted)),
            "d" | "decline" => Some(DashboardCommand::Record(Decision::Declined)),
            "h" | "history" => Some(DashboardCommand::TogglePanel),
            "r" | "reset" => Some(DashboardCommand::Reset),
            "f" | "float" => Some(DashboardCommand::Float),
            "?" | "help" => Some(DashboardCommand::Help),
            "q" | "quit" | "exit" => Some(DashboardCommand::Quit),
            _ => None,
        }
    }
}

/// Full-screen surface bound to a store
pub struct Dashboard<'a, S: KeyValueStore> {
    store: &'a mut OrderHistoryStore<S>,
    history: OrderHistory,
    panel: HistoryPanel,
    display: DisplayConfig,
}

impl<'a, S: KeyValueStore> Dashboard<'a, S> {
    /// Activate the dashboard, loading the persisted history
    pub fn activate(store: &'a mut OrderHistoryStore<S>, display: DisplayConfig) -> Result<Self> {
        let history = store.load().context("Failed to load order history")?;
        Ok(Self {
            store,
            history,
            panel: HistoryPanel::default(),
            display,
        })
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    pub fn panel(&self) -> HistoryPanel {
        self.panel
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary::from(&self.history)
    }

    /// Record a decision and return the notification line
    pub fn record(&mut self, decision: Decision) -> Result<&'static str> {
        self.store.record_decision(&mut self.history, decision)?;
        Ok(decision.notification())
    }

    /// Clear the history; the panel returns to the short view
    pub fn reset(&mut self) -> Result<&'static str> {
        self.store.reset(&mut self.history)?;
        self.panel = HistoryPanel::NextToFallOff;
        Ok("History cleared")
    }

    pub fn toggle_panel(&mut self) {
        self.panel = self.panel.toggled();
    }

    /// Render the whole dashboard
    pub fn render(&self) -> String {
        let mut out = render_summary(&self.summary(), &self.display);
        out.push('\n');
        match self.panel {
            HistoryPanel::NextToFallOff => {
                out.push_str(&render_next_to_fall_off(&self.history, &self.display))
            }
            HistoryPanel::Full => out.push_str(&render_full_history(&self.history, &self.display)),
        }
        out
    }

    fn print_help(&self) {
        println!(
            "{}",
            dim(
                "a accept · d decline · h switch history view · r reset · f floating bubble · q quit",
                self.display.color
            )
        );
    }

    /// Interactive loop
    pub fn run(mut self) -> Result<Handoff> {
        let config = rustyline::Config::builder()
            .edit_mode(rustyline::EditMode::Emacs)
            .auto_add_history(true)
            .build();
        let mut rl = rustyline::DefaultEditor::with_config(config)
            .context("Failed to initialise line editor")?;

        println!("{}", self.render());
        self.print_help();

        loop {
            match rl.readline("dashboard> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match DashboardCommand::parse(&line) {
                        Some(DashboardCommand::Record(decision)) => {
                            let note = self.record(decision)?;
                            println!("{}\n", note);
                            println!("{}", self.render());
                        }
                        Some(DashboardCommand::TogglePanel) => {
                            self.toggle_panel();
                            println!("{}", self.render());
                        }
                        Some(DashboardCommand::Reset) => {
                            if confirm("Are you sure you want to clear all order history? This action cannot be undone.")? {
                                let note = self.reset()?;
                                println!("{}\n", note);
                                println!("{}", self.render());
                            } else {
                                println!("Cancelled.");
                            }
                        }
                        Some(DashboardCommand::Float) => {
                            println!("Floating mode activated");
                            return Ok(Handoff::Bubble);
                        }
                        Some(DashboardCommand::Help) => self.print_help(),
                        Some(DashboardCommand::Quit) => return Ok(Handoff::Exit),
                        None => {
                            println!("Unknown command '{}'", line.trim());
                            self.print_help();
                        }
                    }
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::CAPACITY;
    use crate::storage::MemoryStore;
    use crate::types::Decision::{Accepted as A, Declined as D};

    fn plain() -> DisplayConfig {
        DisplayConfig {
            color: false,
            ..DisplayConfig::default()
        }
    }

    #[test]
    fn test_next_to_fall_off_lists_oldest_five() {
        let history: OrderHistory = vec![D, A, A, D, A, D, D].into_iter().collect();
        let text = render_next_to_fall_off(&history, &plain());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Next 5 Orders to Fall Off");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "   1  ● Decline");
        assert_eq!(lines[2], "   2  ● Accept");
        assert_eq!(lines[5], "   5  ● Accept");
    }

    #[test]
    fn test_empty_panels() {
        let empty = OrderHistory::new();
        assert!(render_next_to_fall_off(&empty, &plain()).contains("No orders to display"));
        assert!(render_full_history(&empty, &plain()).contains("No orders to display"));
    }

    #[test]
    fn test_full_grid_rows() {
        let history: OrderHistory = vec![A; 23].into_iter().collect();
        let text = render_full_history(&history, &plain());
        let rows: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("  ■") && !l.contains("Accept"))
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].matches(CELL).count(), 10);
        assert_eq!(rows[2].matches(CELL).count(), 3);
        assert!(text.contains("Accept  |"));
    }

    #[test]
    fn test_summary_text() {
        let history: OrderHistory = vec![A, A, D, A].into_iter().collect();
        let text = render_summary(&HistorySummary::from(&history), &plain());
        assert!(text.contains("Acceptance rate: 75.0%"));
        assert!(text.contains("Total: 4   Accepted: 3   Declined: 1"));
        assert!(text.contains("Track more orders to see when declines fall off"));
    }

    #[test]
    fn test_dashboard_record_and_reset() {
        let mut store = OrderHistoryStore::new(MemoryStore::new());
        let mut dashboard = Dashboard::activate(&mut store, plain()).unwrap();

        assert_eq!(dashboard.record(A).unwrap(), "✓ Accepted");
        assert_eq!(dashboard.record(D).unwrap(), "✗ Declined");
        assert_eq!(dashboard.summary().acceptance_rate, 50.0);

        dashboard.toggle_panel();
        assert_eq!(dashboard.panel(), HistoryPanel::Full);
        assert!(dashboard.render().contains("Full Order History"));

        assert_eq!(dashboard.reset().unwrap(), "History cleared");
        assert!(dashboard.history().is_empty());
        assert_eq!(dashboard.panel(), HistoryPanel::NextToFallOff);
        drop(dashboard);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_dashboard_reloads_on_activation() {
        let mut store = OrderHistoryStore::new(MemoryStore::new());
        let full: OrderHistory = (0..CAPACITY).map(|i| Decision::from(i != 1)).collect();
        store.save(&full).unwrap();

        let dashboard = Dashboard::activate(&mut store, plain()).unwrap();
        assert_eq!(dashboard.summary().fall_off_countdown, Some(2));
        assert!(dashboard.render().contains("Next decline falls off in 2 orders"));
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(DashboardCommand::parse("a"), Some(DashboardCommand::Record(A)));
        assert_eq!(DashboardCommand::parse(" Decline "), Some(DashboardCommand::Record(D)));
        assert_eq!(DashboardCommand::parse("h"), Some(DashboardCommand::TogglePanel));
        assert_eq!(DashboardCommand::parse("f"), Some(DashboardCommand::Float));
        assert_eq!(DashboardCommand::parse("zzz"), None);
    }
}
