//! Allocation phase benchmark.
//!
//! Stresses an allocator's bookkeeping with four strictly ordered phases
//! over a fixed-capacity table of allocation records:
//!
//! 1. bulk allocate every slot (every 4th request drawn from the large bound)
//! 2. free every third slot, fragmenting the free lists
//! 3. refill empty slots with zeroed allocations and resize live ones
//!    (every 8th request large), exercising reuse and realloc paths
//! 4. free everything
//!
//! Slot order within a phase and the phase order itself are part of the
//! benchmark definition; reordering would change the stress pattern and
//! invalidate comparisons between allocator implementations.

mod driver;
mod table;

pub use driver::{AllocBench, AllocEvent, FULL_RUN_LABEL, Phase};
pub use table::{AllocationTable, MAX_ALLOCATIONS, Slot};

/// Allocator under test.
///
/// Any method may fail by returning `None`; the driver stores the absence
/// as-is and never frees an empty slot, so subjects need no special
/// out-of-memory contract. Zero-size requests are intentional and a subject
/// may answer them with either a unique handle or `None`.
pub trait BenchAllocator {
    /// Opaque ownership token for one allocated block.
    type Handle;

    fn alloc(&mut self, size: usize) -> Option<Self::Handle>;

    fn alloc_zeroed(&mut self, size: usize) -> Option<Self::Handle>;

    /// Resize `handle` to `new_size`, preserving contents up to the smaller
    /// of the two sizes. Consumes the handle either way.
    fn realloc(&mut self, handle: Self::Handle, new_size: usize) -> Option<Self::Handle>;

    fn free(&mut self, handle: Self::Handle);
}
