//! Persisted representation of the order history
//!
//! The history is stored as `1`/`0` markers joined by commas, oldest first,
//! e.g. `"1,1,0,1,0,0,0"`. The empty string is the empty history.

use tracing::warn;

use super::{OrderHistory, CAPACITY};
use crate::types::Decision;

const SEPARATOR: char = ',';

/// Serialize a history into its persisted string form
pub fn encode(history: &OrderHistory) -> String {
    history
        .iter()
        .map(|d| d.marker())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a persisted string back into a history.
///
/// Parsing never fails. Trailing empty tokens are ignored and any token
/// other than `1` reads as a decline. Strings holding more than
/// [`CAPACITY`] entries keep only the newest ones.
pub fn decode(raw: &str) -> OrderHistory {
    if raw.is_empty() {
        return OrderHistory::new();
    }

    let mut tokens: Vec<&str> = raw.split(SEPARATOR).collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    let unknown = tokens.iter().filter(|t| **t != "1" && **t != "0").count();
    if unknown > 0 {
        warn!("{} unrecognised marker(s) in persisted history read as declines", unknown);
    }
    if tokens.len() > CAPACITY {
        warn!(
            "Persisted history holds {} entries, keeping the newest {}",
            tokens.len(),
            CAPACITY
        );
    }

    tokens.into_iter().map(Decision::from_marker).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Decision::{Accepted as A, Declined as D};

    #[test]
    fn test_encode_matches_persisted_layout() {
        let history: OrderHistory = vec![A, A, D, A, D, D, D].into_iter().collect();
        assert_eq!(encode(&history), "1,1,0,1,0,0,0");
        assert_eq!(encode(&OrderHistory::new()), "");

        let single: OrderHistory = vec![D].into_iter().collect();
        assert_eq!(encode(&single), "0");
    }

    #[test]
    fn test_decode_empty_and_separator_only() {
        assert!(decode("").is_empty());
        assert!(decode(",").is_empty());
        assert!(decode(",,,").is_empty());
    }

    #[test]
    fn test_decode_is_lenient() {
        let history = decode("1,x,,true, 1,0");
        let decisions: Vec<Decision> = history.iter().collect();
        assert_eq!(decisions, vec![A, D, D, D, D, D]);
    }

    #[test]
    fn test_decode_drops_trailing_empty_tokens() {
        let decisions: Vec<Decision> = decode("1,0,").iter().collect();
        assert_eq!(decisions, vec![A, D]);
    }

    #[test]
    fn test_decode_leading_empty_token_is_decline() {
        let decisions: Vec<Decision> = decode(",1").iter().collect();
        assert_eq!(decisions, vec![D, A]);
    }

    #[test]
    fn test_round_trip_various_lengths() {
        for len in [0usize, 1, 2, 7, 50, 99, 100] {
            let history: OrderHistory = (0..len).map(|i| Decision::from(i % 3 != 1)).collect();
            assert_eq!(decode(&encode(&history)), history, "length {}", len);
        }
    }

    #[test]
    fn test_decode_oversized_keeps_newest() {
        let mut raw = vec!["0"; 10];
        raw.extend(vec!["1"; CAPACITY]);
        let history = decode(&raw.join(","));
        assert_eq!(history.len(), CAPACITY);
        assert_eq!(history.acceptance_rate(), 100.0);
    }
}
