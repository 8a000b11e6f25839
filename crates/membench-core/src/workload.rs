//! Seeded workload size stream.
//!
//! One pseudo-random stream decides every allocation size in a run. The
//! stream is explicitly seeded by the caller, advances by exactly one draw
//! per size request, and is bit-for-bit reproducible across platforms, so
//! two allocator implementations can be compared against an identical
//! request sequence.

/// Exclusive upper bound for small allocation requests.
pub const SMALL_ALLOC_BOUND: usize = 256;

/// Exclusive upper bound for large allocation requests.
pub const LARGE_ALLOC_BOUND: usize = 65536;

/// Source of allocation sizes for the phase driver.
pub trait SizeSource {
    /// Returns the next size: in `[0, SMALL_ALLOC_BOUND)` when `small`,
    /// otherwise in `[0, LARGE_ALLOC_BOUND)`. Zero is a valid result.
    ///
    /// Implementations must consume exactly one draw from the underlying
    /// stream regardless of which branch is taken, so the stream position
    /// depends only on the number of calls.
    fn next_size(&mut self, small: bool) -> usize;
}

/// Seeded xorshift64* stream.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    state: u64,
}

impl WorkloadGenerator {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state.
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl SizeSource for WorkloadGenerator {
    fn next_size(&mut self, small: bool) -> usize {
        let draw = self.next_u64() as usize;
        if small {
            draw % SMALL_ALLOC_BOUND
        } else {
            draw % LARGE_ALLOC_BOUND
        }
    }
}
