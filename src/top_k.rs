//! HeavyKeeper top-k frequency sketch
//!
//! HeavyKeeper estimates the k most frequent keys in a stream using a
//! `depth × width` matrix of fingerprinted counting cells plus a bounded
//! min-heap of tracked candidates.

use crate::min_heap::MinHeap;
use crate::traits::{FrequencySketch, HeavyHitters, ParamError, Sketch};
use core::fmt::Debug;
use core::hash::Hash;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// Simple xorshift64 PRNG, owned per instance for seedable replay
#[derive(Clone, Debug)]
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x853c49e6748fea9b } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform f64 in [0, 1)
    fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// One counting cell: the fingerprint of the current occupant and its count
#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    fingerprint: u32,
    count: u32,
}

/// Outcome of a single [`TopK::add`] call
///
/// `admitted` is true when the key now occupies a tracker slot, either newly
/// admitted or with an updated estimate. `evicted` names the key pushed out
/// to make room, when an admission displaced one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome<T> {
    /// Key evicted from the tracker by this admission, if any
    pub evicted: Option<T>,
    /// Whether the key was admitted to, or updated in, the tracker
    pub admitted: bool,
}

impl<T> AddOutcome<T> {
    fn rejected() -> Self {
        Self {
            evicted: None,
            admitted: false,
        }
    }
}

/// HeavyKeeper sketch tracking the k most frequent keys of a stream
///
/// Each key hashes to one cell per row (a row-specific seed gives each row an
/// independent placement). An empty cell is claimed outright and a cell owned
/// by the same fingerprint counts up; a collision triggers a decay race where
/// the occupant's count is decremented with probability `decay^count` per
/// increment unit. The key's candidate frequency is the maximum estimate
/// across the rows where it holds a cell — collisions can only suppress a
/// row's estimate, never inflate it, so the least-interfered row is the best
/// evidence available.
///
/// Guarantees:
/// - Tracker size never exceeds `k`; updates are O(depth + log k)
/// - Tracked estimates never over-count beyond fingerprint-collision noise
/// - Non-dominant keys may be under-counted (by design)
///
/// # Example
///
/// ```
/// use heavykeeper::TopK;
///
/// let mut topk = TopK::new(3, 1024, 4, 0.9).unwrap();
///
/// topk.add("apple", 10);
/// topk.add("banana", 5);
///
/// assert_eq!(topk.estimate(&"apple"), Some(10));
/// assert_eq!(topk.list()[0], ("apple", 10));
/// ```
///
/// # Concurrency
///
/// Not internally synchronized; callers must serialize access. Each instance
/// owns its random generator, so sharded instances never contend on shared
/// random state.
#[derive(Clone, Debug)]
pub struct TopK<T: Hash + Eq + Clone + AsRef<[u8]> + Debug> {
    /// Tracker capacity
    k: usize,
    /// Cells per row
    width: usize,
    /// Number of rows
    depth: usize,
    /// Decay base in (0, 1]
    decay: f64,
    /// Contiguous `depth * width` cell block, indexed `row * width + column`
    cells: Vec<Cell>,
    /// Per-row hash seeds
    seeds: Vec<u64>,
    /// Tracked top-k candidates
    heap: MinHeap<T>,
    /// Random source for decay decisions
    rng: Xorshift64,
    /// Total count of all increments
    total_count: u64,
    /// Number of updates
    num_updates: u64,
}

impl<T: Hash + Eq + Clone + AsRef<[u8]> + Debug> TopK<T> {
    /// Create a new HeavyKeeper sketch
    ///
    /// # Arguments
    ///
    /// * `k` - Number of keys to track
    /// * `width` - Cells per row (larger = fewer collisions)
    /// * `depth` - Number of rows (larger = better collision resilience)
    /// * `decay` - Decay base in `(0, 1]`; values near 1 evict occupants
    ///   readily, small values protect them
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if any dimension is zero or `decay` is outside
    /// `(0, 1]`.
    pub fn new(k: usize, width: usize, depth: usize, decay: f64) -> Result<Self, ParamError> {
        Self::with_seed(k, width, depth, decay, 0x12345678)
    }

    /// Create a sketch with an explicit seed for the decay random source
    ///
    /// Two instances built with the same seed and fed the same stream behave
    /// identically, which makes collision behavior reproducible in tests.
    pub fn with_seed(
        k: usize,
        width: usize,
        depth: usize,
        decay: f64,
        seed: u64,
    ) -> Result<Self, ParamError> {
        if k == 0 {
            return Err(ParamError::ZeroCapacity);
        }
        if width == 0 {
            return Err(ParamError::ZeroWidth);
        }
        if depth == 0 {
            return Err(ParamError::ZeroDepth);
        }
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(ParamError::DecayOutOfRange(decay));
        }

        let seeds: Vec<u64> = (0..depth)
            .map(|i| (i as u64).wrapping_mul(0x9e3779b97f4a7c15))
            .collect();

        Ok(Self {
            k,
            width,
            depth,
            decay,
            cells: vec![Cell::default(); width * depth],
            seeds,
            heap: MinHeap::new(k),
            rng: Xorshift64::new(seed),
            total_count: 0,
            num_updates: 0,
        })
    }

    /// Get the tracker capacity (k)
    pub fn k(&self) -> usize {
        self.k
    }

    /// Get the width of each row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the number of rows
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the decay base
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Get the number of keys currently tracked
    pub fn tracked(&self) -> usize {
        self.heap.len()
    }

    /// Get the total count of all increments
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Observe a key with the given increment
    ///
    /// Updates the cell matrix, then decides admission against the tracker
    /// minimum as it stood before this call touched the matrix. A full
    /// tracker only admits keys whose estimate strictly exceeds that minimum.
    ///
    /// `add(key, 0)` is a no-op and reports a rejection.
    pub fn add(&mut self, item: T, incr: u32) -> AddOutcome<T> {
        if incr == 0 {
            return AddOutcome::rejected();
        }
        self.num_updates += 1;
        self.total_count += u64::from(incr);

        let fingerprint = xxh3_64(item.as_ref()) as u32;
        let threshold = self.heap.min();
        let max_count = self.observe(item.as_ref(), fingerprint, incr);

        if self.heap.is_full() && max_count <= threshold {
            return AddOutcome::rejected();
        }
        if let Some(slot) = self.heap.find(&item) {
            self.heap.fix(slot, max_count);
            return AddOutcome {
                evicted: None,
                admitted: true,
            };
        }
        AddOutcome {
            evicted: self.heap.admit(item, max_count),
            admitted: true,
        }
    }

    /// Check whether a key currently occupies a tracker slot. O(1).
    pub fn contains(&self, item: &T) -> bool {
        self.heap.find(item).is_some()
    }

    /// Current tracked estimate for a key, or `None` if not tracked. O(1).
    pub fn estimate(&self, item: &T) -> Option<u32> {
        self.heap.find(item).map(|slot| self.heap.count_at(slot))
    }

    /// All tracked keys with their estimates, highest count first
    pub fn list(&self) -> Vec<(T, u32)> {
        self.heap.sorted()
    }

    /// Update every row's cell for this key and return the best estimate
    /// across the rows where the key holds a cell (0 if it lost everywhere).
    fn observe(&mut self, bytes: &[u8], fingerprint: u32, incr: u32) -> u32 {
        let mut max_count = 0u32;

        for row in 0..self.depth {
            let hash = xxh3_64_with_seed(bytes, self.seeds[row]);
            let column = (hash as usize) % self.width;
            let cell = &mut self.cells[row * self.width + column];

            if cell.count == 0 {
                cell.fingerprint = fingerprint;
                cell.count = incr;
                max_count = max_count.max(incr);
            } else if cell.fingerprint == fingerprint {
                cell.count = cell.count.saturating_add(incr);
                max_count = max_count.max(cell.count);
            } else {
                // Decay race: one increment unit per iteration. The occupant
                // is decremented with probability decay^count computed from
                // its current count, so a strong occupant hardens as its
                // count grows.
                let mut remaining = incr;
                while remaining > 0 {
                    let probability = self.decay.powf(f64::from(cell.count));
                    if self.rng.next_f64() < probability {
                        cell.count -= 1;
                        if cell.count == 0 {
                            cell.fingerprint = fingerprint;
                            cell.count = remaining;
                            max_count = max_count.max(remaining);
                            break;
                        }
                    }
                    remaining -= 1;
                }
            }
        }

        max_count
    }
}

impl<T: Hash + Eq + Clone + AsRef<[u8]> + Debug> Sketch for TopK<T> {
    type Item = T;

    fn update(&mut self, item: &T) {
        self.add(item.clone(), 1);
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.heap.clear();
        self.total_count = 0;
        self.num_updates = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.cells.len() * core::mem::size_of::<Cell>()
            + self.seeds.len() * core::mem::size_of::<u64>()
            + self.heap.size_bytes()
    }

    fn count(&self) -> u64 {
        self.num_updates
    }
}

impl<T: Hash + Eq + Clone + AsRef<[u8]> + Debug> FrequencySketch for TopK<T> {
    fn estimate_frequency(&self, item: &T) -> u64 {
        u64::from(self.estimate(item).unwrap_or(0))
    }
}

impl<T: Hash + Eq + Clone + AsRef<[u8]> + Debug> HeavyHitters for TopK<T> {
    fn heavy_hitters(&self, threshold: f64) -> Vec<(T, u64)> {
        let min_count = (threshold * self.total_count as f64) as u64;

        self.list()
            .into_iter()
            .map(|(item, count)| (item, u64::from(count)))
            .filter(|&(_, count)| count >= min_count)
            .collect()
    }

    fn top_k(&self, k: usize) -> Vec<(T, u64)> {
        let mut items: Vec<_> = self
            .list()
            .into_iter()
            .map(|(item, count)| (item, u64::from(count)))
            .collect();
        items.truncate(k);
        items
    }
}
