//! # HeavyKeeper
//!
//! Top-k heavy hitter detection for high-volume key streams in bounded memory.
//!
//! HeavyKeeper couples a fixed-size sketch of fingerprinted counting cells with
//! a bounded min-heap, trading exactness for space: per-key cost is
//! O(depth + log k) regardless of how many distinct keys the stream contains.
//! Colliding keys fight for cells probabilistically — an occupant with count
//! `c` is decremented with probability `decay^c`, so dominant keys are nearly
//! impossible to displace while stragglers are washed out quickly.
//!
//! Typical uses: network flow monitoring, cache admission and eviction
//! scoring, hot-key detection in distributed stores.
//!
//! ## Quick Start
//!
//! ```rust
//! use heavykeeper::prelude::*;
//!
//! // Track the 10 hottest keys with a 1024x4 sketch and decay 0.9
//! let mut topk = TopK::new(10, 1024, 4, 0.9).unwrap();
//!
//! for key in ["get:user:1", "get:user:2", "get:user:1"] {
//!     topk.add(key, 1);
//! }
//!
//! assert!(topk.contains(&"get:user:1"));
//! for (key, count) in topk.list() {
//!     println!("{}: {}", key, count);
//! }
//! ```
//!
//! ## Accuracy
//!
//! Estimates can under-count keys that lose decay races, never over-count
//! beyond fingerprint-collision noise. Any key whose frequency dominates its
//! cell collisions is tracked with near-exact counts; the crate tests exercise
//! the statistical guarantees against zipf-like streams.
//!
//! ## Concurrency
//!
//! The structure is deliberately unsynchronized. Wrap it in a mutex, or shard
//! by key across independent instances; each instance owns its random state,
//! so sharded replay is deterministic per seed.

pub mod traits;

mod min_heap;
mod top_k;

pub use top_k::{AddOutcome, TopK};

pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{AddOutcome, TopK};
}
