//! Inert counter source for platforms (or builds) without a facility.

use crate::{CounterSource, PhaseCost, Snapshot};

/// Source whose snapshots carry no counters and whose reports are silent.
///
/// Drivers run exactly the same code path against this as against a real
/// source; the deltas simply come out empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCounters;

impl CounterSource for NoopCounters {
    fn snapshot(&mut self) -> Snapshot {
        Snapshot::inert()
    }

    fn report(&self, _label: &str, _cost: &PhaseCost) {}
}
