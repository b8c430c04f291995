//! Core traits and shared error types
//!
//! The base [`Sketch`] trait covers the lifecycle every streaming structure
//! shares; [`FrequencySketch`] and [`HeavyHitters`] add the frequency-specific
//! query surface.

use core::fmt::Debug;

/// Error rejecting invalid construction parameters
///
/// This is the crate's only failure path: everything at steady state
/// (rejection of a low-frequency key, eviction, a missed lookup) is an
/// ordinary outcome communicated through return values.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// `k` (tracker capacity) was zero
    ZeroCapacity,
    /// Sketch width was zero
    ZeroWidth,
    /// Sketch depth was zero
    ZeroDepth,
    /// Decay base outside `(0, 1]`, carrying the rejected value
    DecayOutOfRange(f64),
}

impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamError::ZeroCapacity => write!(f, "k must be positive"),
            ParamError::ZeroWidth => write!(f, "width must be positive"),
            ParamError::ZeroDepth => write!(f, "depth must be positive"),
            ParamError::DecayOutOfRange(v) => {
                write!(f, "decay must be in (0, 1], got {}", v)
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Core trait for all streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Frequency estimation sketches
pub trait FrequencySketch: Sketch {
    /// Estimate frequency of an item
    fn estimate_frequency(&self, item: &Self::Item) -> u64;

    /// Check if frequency exceeds threshold
    fn exceeds_threshold(&self, item: &Self::Item, threshold: u64) -> bool {
        self.estimate_frequency(item) >= threshold
    }
}

/// Heavy hitters / Top-K capability
pub trait HeavyHitters: FrequencySketch
where
    Self::Item: Sized + Clone,
{
    /// Get items with estimated frequency above threshold
    ///
    /// Threshold is a fraction of total count (0.0 to 1.0)
    fn heavy_hitters(&self, threshold: f64) -> Vec<(Self::Item, u64)>;

    /// Get top-k most frequent items
    fn top_k(&self, k: usize) -> Vec<(Self::Item, u64)>;
}
