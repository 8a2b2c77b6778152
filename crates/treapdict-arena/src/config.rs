//! Arena configuration parameters.

/// Configuration for a node arena.
///
/// Controls the initial slot count and how the priority generator is
/// seeded. All values are read once at arena construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of slots allocated up front.
    ///
    /// Default: 16. A value of 0 is raised to 1 so that doubling always
    /// makes progress.
    pub initial_capacity: u32,

    /// Seed for the priority generator.
    ///
    /// `None` draws a seed from the operating system. A fixed seed makes
    /// tree shapes reproducible, which tests and benchmarks rely on.
    pub seed: Option<u64>,
}

impl ArenaConfig {
    /// Default number of slots in a fresh arena.
    pub const DEFAULT_INITIAL_CAPACITY: u32 = 16;

    /// Create a config with the given initial capacity and an OS-drawn seed.
    pub fn new(initial_capacity: u32) -> Self {
        Self {
            initial_capacity,
            seed: None,
        }
    }

    /// Replace the seed with a fixed value.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Capacity actually allocated at construction (never zero).
    pub fn effective_capacity(&self) -> u32 {
        self.initial_capacity.max(1)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}
