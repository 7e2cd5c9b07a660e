//! Order Tracker - acceptance-rate tracker for delivery drivers
//!
//! Keeps the last 100 accept/decline decisions in a rolling window and
//! derives:
//! - the acceptance rate and its low/medium/high band
//! - how many more orders until the oldest decline falls out of the window
//!
//! # Example
//!
//! ```
//! use order_tracker::{Decision, MemoryStore, OrderHistoryStore};
//!
//! let mut store = OrderHistoryStore::new(MemoryStore::new());
//! let mut history = store.load().unwrap();
//! for accepted in [true, true, false, true] {
//!     store.record_decision(&mut history, Decision::from(accepted)).unwrap();
//! }
//! assert_eq!(history.acceptance_rate(), 75.0);
//! assert_eq!(history.fall_off_countdown(), None);
//! ```

pub mod types;
pub mod history;
pub mod storage;
pub mod store;
pub mod summary;
pub mod config;
pub mod surface;
pub mod cli;

// Re-export commonly used types for convenience
pub use types::Decision;

pub use history::{OrderHistory, RateBand, CAPACITY};

pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

pub use store::{OrderHistoryStore, StoreError};

pub use summary::{FallOffStatus, HistorySummary};

pub use config::Config;
