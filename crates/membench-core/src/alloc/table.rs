//! Fixed-capacity table of allocation records.

/// Compile-time default table capacity.
pub const MAX_ALLOCATIONS: usize = 4096;

/// One live-or-freed allocation slot.
#[derive(Debug)]
pub struct Slot<H> {
    /// Ownership token for the block; `None` iff the slot is empty.
    pub handle: Option<H>,
    /// Requested size at the last (re)allocation. Retained after a free
    /// for logging until the slot is overwritten.
    pub size: usize,
}

impl<H> Slot<H> {
    fn empty() -> Self {
        Self {
            handle: None,
            size: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }
}

/// The allocation record table.
///
/// Sized once at construction and never grown, so the harness's own
/// bookkeeping stays out of the measured allocations.
#[derive(Debug)]
pub struct AllocationTable<H> {
    slots: Vec<Slot<H>>,
}

impl<H> AllocationTable<H> {
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| Slot::empty()).collect();
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empties every slot and zeroes the retained sizes.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::empty();
        }
    }

    pub fn slot(&self, index: usize) -> &Slot<H> {
        &self.slots[index]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Slot<H> {
        &mut self.slots[index]
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_live()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<H>> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_fully_empty() {
        let table: AllocationTable<u32> = AllocationTable::new(16);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.live_count(), 0);
        assert!(table.iter().all(|slot| slot.size == 0));
    }

    #[test]
    fn reset_clears_handles_and_sizes() {
        let mut table: AllocationTable<u32> = AllocationTable::new(4);
        *table.slot_mut(1) = Slot {
            handle: Some(7),
            size: 128,
        };
        table.reset();
        assert_eq!(table.live_count(), 0);
        assert_eq!(table.slot(1).size, 0);
    }
}
