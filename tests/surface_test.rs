//! Tests for the dashboard and bubble surfaces sharing one store

use order_tracker::config::DisplayConfig;
use order_tracker::surface::{Bubble, BubbleEvent, BubbleState, Dashboard, Handoff, HistoryPanel};
use order_tracker::{Decision, MemoryStore, OrderHistoryStore};

fn plain() -> DisplayConfig {
    DisplayConfig {
        color: false,
        ..DisplayConfig::default()
    }
}

#[test]
fn test_bubble_then_dashboard_handoff() {
    let mut store = OrderHistoryStore::new(MemoryStore::new());

    let mut bubble = Bubble::activate(&mut store, plain()).unwrap();
    assert_eq!(bubble.state(), BubbleState::Expanded);
    bubble.handle(BubbleEvent::Accept).unwrap();
    bubble.handle(BubbleEvent::Accept).unwrap();
    bubble.handle(BubbleEvent::Decline).unwrap();
    let handoff = bubble.handle(BubbleEvent::Maximize).unwrap();
    assert_eq!(handoff, Some(Handoff::Dashboard));

    let mut dashboard = Dashboard::activate(&mut store, plain()).unwrap();
    let summary = dashboard.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.declined, 1);
    assert!(dashboard.render().contains("Acceptance rate: 66.7%"));
    assert!(dashboard.render().contains("Next 5 Orders to Fall Off"));

    dashboard.toggle_panel();
    assert_eq!(dashboard.panel(), HistoryPanel::Full);

    dashboard.record(Decision::Accepted).unwrap();
    assert_eq!(dashboard.summary().rate_text(), "75.0%");
}

#[test]
fn test_reset_from_dashboard_is_seen_by_bubble() {
    let mut store = OrderHistoryStore::new(MemoryStore::new());

    let mut dashboard = Dashboard::activate(&mut store, plain()).unwrap();
    dashboard.record(Decision::Declined).unwrap();
    dashboard.reset().unwrap();

    let bubble = Bubble::activate(&mut store, plain()).unwrap();
    assert!(bubble.history().is_empty());
    assert!(bubble.render().contains("AR 0%"));
}
