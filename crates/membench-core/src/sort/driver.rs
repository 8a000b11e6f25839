//! Repeated-sort driver.

use membench_counters::{CounterSource, delta};

use super::{Direction, DirectedComparator, SortRoutine};
use crate::error::UsageError;

/// Buffer capacity in elements.
pub const SORT_CAPACITY: usize = 65536;

/// Label for the timed iteration loop.
pub const LOOP_LABEL: &str = "-benchmark-loop";

/// Driver owning the sort buffer.
///
/// The buffer is allocated once at construction and only its first `n`
/// elements participate in a run, so the measured loop never allocates.
pub struct SortBench {
    buffer: Box<[i64]>,
}

impl SortBench {
    pub fn new() -> Self {
        Self::with_capacity(SORT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0i64; capacity].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &[i64] {
        &self.buffer
    }

    /// Writes the monotonic starting sequence into the first `n` elements:
    /// `0, 1, ..., n-1` ascending, `n, n-1, ..., 1` descending.
    ///
    /// Idempotent per direction, so a "sort once, verify" extension can
    /// restore the buffer between runs.
    pub fn init_buffer(&mut self, n: usize, direction: Direction) -> Result<(), UsageError> {
        if n < 1 || n > self.buffer.len() {
            return Err(UsageError::BufferSize {
                requested: n,
                capacity: self.buffer.len(),
            });
        }
        for (index, value) in self.buffer[..n].iter_mut().enumerate() {
            *value = match direction {
                Direction::Ascending => index as i64,
                Direction::Descending => (n - index) as i64,
            };
        }
        Ok(())
    }

    /// Initializes the buffer and times `iterations` calls of the subject
    /// as one interval, reported under [`LOOP_LABEL`].
    ///
    /// After the first call the buffer is already in the subject's output
    /// order; the remaining iterations deliberately measure its
    /// already-sorted path. Validation fails fast before any timing.
    pub fn run(
        &mut self,
        n: usize,
        iterations: u64,
        direction: Direction,
        subject: &dyn SortRoutine,
        counters: &mut dyn CounterSource,
    ) -> Result<(), UsageError> {
        if iterations < 1 {
            return Err(UsageError::Iterations(iterations));
        }
        self.init_buffer(n, direction)?;
        let cmp = DirectedComparator::new(direction);

        let start = counters.snapshot();
        for _ in 0..iterations {
            subject.sort(&mut self.buffer[..n], &cmp);
        }
        let end = counters.snapshot();
        counters.report(LOOP_LABEL, &delta(&end, &start));
        Ok(())
    }
}

impl Default for SortBench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::StdSort;
    use membench_counters::{NoopCounters, PhaseCost, Snapshot};

    #[derive(Default)]
    struct ProbeCounters {
        snapshots: usize,
    }

    impl CounterSource for ProbeCounters {
        fn snapshot(&mut self) -> Snapshot {
            self.snapshots += 1;
            Snapshot::inert()
        }

        fn report(&self, _label: &str, _cost: &PhaseCost) {}
    }

    #[test]
    fn ascending_init_counts_from_zero() {
        let mut bench = SortBench::with_capacity(16);
        bench.init_buffer(5, Direction::Ascending).unwrap();
        assert_eq!(&bench.buffer()[..5], &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn descending_init_counts_down_from_n() {
        let mut bench = SortBench::with_capacity(16);
        bench.init_buffer(5, Direction::Descending).unwrap();
        assert_eq!(&bench.buffer()[..5], &[5, 4, 3, 2, 1]);
    }

    #[test]
    fn init_is_idempotent_per_direction() {
        let mut bench = SortBench::with_capacity(8);
        bench.init_buffer(8, Direction::Descending).unwrap();
        let first: Vec<i64> = bench.buffer().to_vec();
        bench.init_buffer(8, Direction::Descending).unwrap();
        assert_eq!(bench.buffer(), &first[..]);

        // Switching direction and back restores the original content.
        bench.init_buffer(8, Direction::Ascending).unwrap();
        bench.init_buffer(8, Direction::Descending).unwrap();
        assert_eq!(bench.buffer(), &first[..]);
    }

    #[test]
    fn run_sorts_into_the_comparator_order() {
        let mut bench = SortBench::with_capacity(64);
        let mut counters = NoopCounters;
        bench
            .run(64, 3, Direction::Ascending, &StdSort, &mut counters)
            .unwrap();
        // Ascending init is already in ascending comparator order.
        let expected: Vec<i64> = (0..64).collect();
        assert_eq!(bench.buffer(), &expected[..]);

        bench
            .run(64, 1, Direction::Descending, &StdSort, &mut counters)
            .unwrap();
        let expected: Vec<i64> = (1..=64).rev().collect();
        assert_eq!(bench.buffer(), &expected[..]);
    }

    #[test]
    fn invalid_sizes_are_rejected_before_timing() {
        let mut bench = SortBench::with_capacity(32);
        let mut counters = ProbeCounters::default();

        let err = bench
            .run(0, 1, Direction::Ascending, &StdSort, &mut counters)
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::BufferSize {
                requested: 0,
                capacity: 32
            }
        );

        let err = bench
            .run(33, 1, Direction::Ascending, &StdSort, &mut counters)
            .unwrap_err();
        assert_eq!(
            err,
            UsageError::BufferSize {
                requested: 33,
                capacity: 32
            }
        );

        let err = bench
            .run(16, 0, Direction::Ascending, &StdSort, &mut counters)
            .unwrap_err();
        assert_eq!(err, UsageError::Iterations(0));

        assert_eq!(counters.snapshots, 0);
    }
}
