//! Sort benchmark.
//!
//! Times a sort routine over a buffer initialized to a strictly monotonic
//! (already sorted or reverse sorted) sequence, the adversarial case for
//! comparison-sort pivot selection. The comparator is dispatched through a
//! trait object on every call, modeling a realistic non-inlinable,
//! state-dependent comparator rather than one the subject can fold away.

mod driver;
mod quicksort;

pub use driver::{LOOP_LABEL, SORT_CAPACITY, SortBench};
pub use quicksort::Quicksort;

use std::cmp::Ordering;

use crate::error::UsageError;

/// Buffer setup and comparison direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Parses the single-character CLI flag (`'a'` or `'d'`).
    pub fn from_flag(flag: char) -> Result<Self, UsageError> {
        match flag {
            'a' => Ok(Direction::Ascending),
            'd' => Ok(Direction::Descending),
            other => Err(UsageError::Direction(other)),
        }
    }
}

/// Three-way element comparison, reached through indirect dispatch.
pub trait Compare {
    fn compare(&self, a: i64, b: i64) -> Ordering;
}

/// Comparator with its direction fixed at construction.
///
/// Direction is baked in rather than read from shared mutable state; the
/// call through `&dyn Compare` keeps the indirection the benchmark wants.
#[derive(Debug, Clone, Copy)]
pub struct DirectedComparator {
    direction: Direction,
}

impl DirectedComparator {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl Compare for DirectedComparator {
    fn compare(&self, a: i64, b: i64) -> Ordering {
        match self.direction {
            Direction::Ascending => a.cmp(&b),
            Direction::Descending => b.cmp(&a),
        }
    }
}

/// Sort routine under test.
pub trait SortRoutine {
    fn sort(&self, data: &mut [i64], cmp: &dyn Compare);
}

/// The standard library's unstable sort, driven through the indirect
/// comparator like any other subject.
#[derive(Debug, Default)]
pub struct StdSort;

impl SortRoutine for StdSort {
    fn sort(&self, data: &mut [i64], cmp: &dyn Compare) {
        data.sort_unstable_by(|a, b| cmp.compare(*a, *b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_flag_parsing() {
        assert_eq!(Direction::from_flag('a'), Ok(Direction::Ascending));
        assert_eq!(Direction::from_flag('d'), Ok(Direction::Descending));
        assert_eq!(Direction::from_flag('x'), Err(UsageError::Direction('x')));
    }

    #[test]
    fn comparator_sign_matches_direction() {
        let asc = DirectedComparator::new(Direction::Ascending);
        assert_eq!(asc.compare(1, 2), Ordering::Less);
        assert_eq!(asc.compare(2, 1), Ordering::Greater);
        assert_eq!(asc.compare(3, 3), Ordering::Equal);
        assert_eq!(asc.compare(-5, 5), Ordering::Less);

        let desc = DirectedComparator::new(Direction::Descending);
        assert_eq!(desc.compare(1, 2), Ordering::Greater);
        assert_eq!(desc.compare(2, 1), Ordering::Less);
        assert_eq!(desc.compare(3, 3), Ordering::Equal);
        assert_eq!(desc.compare(i64::MIN, i64::MAX), Ordering::Greater);
    }

    #[test]
    fn std_subject_sorts_through_the_indirect_comparator() {
        let mut data = vec![3i64, 1, 4, 1, 5, 9, 2, 6];
        StdSort.sort(&mut data, &DirectedComparator::new(Direction::Descending));
        assert_eq!(data, [9, 6, 5, 4, 3, 2, 1, 1]);
    }
}
