//! Terminal presentation surfaces
//!
//! - [`dashboard`]: full view with counts, fall-off prediction and history panels
//! - [`bubble`]: compact always-at-hand view with accept/decline keys
//!
//! Both surfaces load the history from the shared store when they are
//! activated and persist through it after every mutation.

pub mod bubble;
pub mod dashboard;

use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

use crate::history::RateBand;

pub use bubble::{Bubble, BubbleEvent, BubbleState};
pub use dashboard::{Dashboard, HistoryPanel};

/// Which surface should take over after the current one ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    Dashboard,
    Bubble,
    Exit,
}

pub(crate) const ACCEPT_COLOR: Color = Color::Rgb { r: 0x4C, g: 0xAF, b: 0x50 };
pub(crate) const DECLINE_COLOR: Color = Color::Rgb { r: 0xF4, g: 0x43, b: 0x36 };
pub(crate) const MEDIUM_COLOR: Color = Color::Rgb { r: 0xFF, g: 0xB3, b: 0x00 };

/// Color associated with an acceptance-rate band
pub fn band_color(band: RateBand) -> Color {
    match band {
        RateBand::Low => DECLINE_COLOR,
        RateBand::Medium => MEDIUM_COLOR,
        RateBand::High => ACCEPT_COLOR,
    }
}

/// Wrap `text` in a foreground color when `enabled`
pub(crate) fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Dimmed text
pub(crate) fn dim(text: &str, enabled: bool) -> String {
    paint(text, Color::DarkGrey, enabled)
}

/// Ask for an explicit "yes" before a destructive action
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    println!("{}", prompt);
    println!("Type 'yes' to confirm:");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors() {
        assert_eq!(band_color(RateBand::Low), DECLINE_COLOR);
        assert_eq!(band_color(RateBand::Medium), MEDIUM_COLOR);
        assert_eq!(band_color(RateBand::High), ACCEPT_COLOR);
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("75.0%", ACCEPT_COLOR, false), "75.0%");
        assert_ne!(paint("75.0%", ACCEPT_COLOR, true), "75.0%");
    }
}
