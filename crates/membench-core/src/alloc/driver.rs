//! Four-phase allocation driver.

use membench_counters::{CounterSource, delta};

use super::{AllocationTable, BenchAllocator, MAX_ALLOCATIONS, Slot};
use crate::error::UsageError;
use crate::workload::SizeSource;

/// Label for the whole-run delta (phases 1 through 4).
pub const FULL_RUN_LABEL: &str = "-full-benchmark";

/// The four ordered benchmark phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BulkAlloc,
    PartialFree,
    Resize,
    FullFree,
}

impl Phase {
    /// Tag under which this phase's cost delta is reported.
    pub fn label(self) -> &'static str {
        match self {
            Phase::BulkAlloc => "-initial-malloc",
            Phase::PartialFree => "-partial-free",
            Phase::Resize => "-realloc",
            Phase::FullFree => "-complete-free",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::BulkAlloc => "bulk allocate",
            Phase::PartialFree => "partial free",
            Phase::Resize => "resize/replace",
            Phase::FullFree => "full free",
        })
    }
}

/// Per-operation observations emitted from inside the phase loops.
///
/// `populated` reflects whether the subject returned a handle; a `false`
/// is recorded and otherwise ignored, per the pass-through failure policy.
#[derive(Debug, Clone, Copy)]
pub enum AllocEvent {
    Alloc {
        index: usize,
        size: usize,
        populated: bool,
    },
    AllocZeroed {
        index: usize,
        size: usize,
        populated: bool,
    },
    Realloc {
        index: usize,
        old_size: usize,
        new_size: usize,
        populated: bool,
    },
    Free {
        index: usize,
        size: usize,
    },
    PhaseDone(Phase),
}

/// Driver owning the record table and the allocator under test.
pub struct AllocBench<A: BenchAllocator> {
    table: AllocationTable<A::Handle>,
    subject: A,
}

impl<A: BenchAllocator> AllocBench<A> {
    pub fn new(subject: A) -> Self {
        Self::with_capacity(subject, MAX_ALLOCATIONS)
    }

    pub fn with_capacity(subject: A, capacity: usize) -> Self {
        Self {
            table: AllocationTable::new(capacity),
            subject,
        }
    }

    pub fn table(&self) -> &AllocationTable<A::Handle> {
        &self.table
    }

    /// Runs the four phases over slots `0..elements` in increasing index
    /// order, reporting the four phase deltas and the full-run delta.
    ///
    /// Fails fast on an out-of-range element count, before the table is
    /// touched or any snapshot is taken.
    pub fn run(
        &mut self,
        elements: usize,
        sizes: &mut dyn SizeSource,
        counters: &mut dyn CounterSource,
        events: &mut dyn FnMut(AllocEvent),
    ) -> Result<(), UsageError> {
        if elements < 1 || elements > self.table.capacity() {
            return Err(UsageError::ElementCount {
                requested: elements,
                capacity: self.table.capacity(),
            });
        }
        self.table.reset();

        let start = counters.snapshot();
        self.bulk_alloc(elements, sizes, events);
        let after_alloc = counters.snapshot();
        events(AllocEvent::PhaseDone(Phase::BulkAlloc));

        self.partial_free(elements, events);
        let after_partial = counters.snapshot();
        events(AllocEvent::PhaseDone(Phase::PartialFree));

        self.resize_or_replace(elements, sizes, events);
        let after_resize = counters.snapshot();
        events(AllocEvent::PhaseDone(Phase::Resize));

        self.full_free(elements, events);
        let end = counters.snapshot();
        events(AllocEvent::PhaseDone(Phase::FullFree));

        counters.report(Phase::BulkAlloc.label(), &delta(&after_alloc, &start));
        counters.report(Phase::PartialFree.label(), &delta(&after_partial, &after_alloc));
        counters.report(Phase::Resize.label(), &delta(&after_resize, &after_partial));
        counters.report(Phase::FullFree.label(), &delta(&end, &after_resize));
        counters.report(FULL_RUN_LABEL, &delta(&end, &start));
        Ok(())
    }

    /// Phase 1: allocate a block for every slot. Every 4th request is
    /// drawn from the large bound to cross size-class boundaries.
    fn bulk_alloc(
        &mut self,
        elements: usize,
        sizes: &mut dyn SizeSource,
        events: &mut dyn FnMut(AllocEvent),
    ) {
        for index in 0..elements {
            let size = sizes.next_size(index % 4 != 3);
            let handle = self.subject.alloc(size);
            events(AllocEvent::Alloc {
                index,
                size,
                populated: handle.is_some(),
            });
            *self.table.slot_mut(index) = Slot { handle, size };
        }
    }

    /// Phase 2: free every third slot, leaving mixed-size gaps.
    fn partial_free(&mut self, elements: usize, events: &mut dyn FnMut(AllocEvent)) {
        for index in (0..elements).step_by(3) {
            let slot = self.table.slot_mut(index);
            let size = slot.size;
            let handle = slot.handle.take();
            if let Some(handle) = handle {
                self.subject.free(handle);
            }
            events(AllocEvent::Free { index, size });
        }
    }

    /// Phase 3: fill the gaps with fresh zeroed blocks and resize every
    /// still-live block. Every 8th request is drawn from the large bound.
    fn resize_or_replace(
        &mut self,
        elements: usize,
        sizes: &mut dyn SizeSource,
        events: &mut dyn FnMut(AllocEvent),
    ) {
        for index in 0..elements {
            let new_size = sizes.next_size(index % 8 != 7);
            let slot = self.table.slot_mut(index);
            let old_size = slot.size;
            match slot.handle.take() {
                None => {
                    let handle = self.subject.alloc_zeroed(new_size);
                    events(AllocEvent::AllocZeroed {
                        index,
                        size: new_size,
                        populated: handle.is_some(),
                    });
                    *self.table.slot_mut(index) = Slot {
                        handle,
                        size: new_size,
                    };
                }
                Some(handle) => {
                    let handle = self.subject.realloc(handle, new_size);
                    events(AllocEvent::Realloc {
                        index,
                        old_size,
                        new_size,
                        populated: handle.is_some(),
                    });
                    *self.table.slot_mut(index) = Slot {
                        handle,
                        size: new_size,
                    };
                }
            }
        }
    }

    /// Phase 4: free every slot unconditionally.
    fn full_free(&mut self, elements: usize, events: &mut dyn FnMut(AllocEvent)) {
        for index in 0..elements {
            let slot = self.table.slot_mut(index);
            let size = slot.size;
            let handle = slot.handle.take();
            if let Some(handle) = handle {
                self.subject.free(handle);
            }
            events(AllocEvent::Free { index, size });
        }
    }
}
