//! Reference quicksort subject.

use std::cmp::Ordering;

use super::{Compare, SortRoutine};

/// Partitions at or below this length are finished with insertion sort.
const INSERTION_CUTOFF: usize = 16;

/// Median-of-three quicksort over `i64` slices.
///
/// The benchmark's defining input is an already-sorted buffer, so the pivot
/// must not be a fixed end element: median-of-three keeps the partitions
/// balanced there, and recursing only into the smaller side bounds the
/// stack at O(log n) even on skewed inputs.
#[derive(Debug, Default)]
pub struct Quicksort;

impl SortRoutine for Quicksort {
    fn sort(&self, data: &mut [i64], cmp: &dyn Compare) {
        quicksort(data, cmp);
    }
}

fn quicksort(data: &mut [i64], cmp: &dyn Compare) {
    let mut rest = data;
    loop {
        let len = rest.len();
        if len <= INSERTION_CUTOFF {
            insertion_sort(rest, cmp);
            return;
        }
        let pivot_index = median_of_three(rest, cmp);
        rest.swap(pivot_index, len - 1);
        let mid = partition(rest, cmp);

        let (left, right) = rest.split_at_mut(mid);
        // The pivot sits at right[0] and is already in place.
        let right = &mut right[1..];
        if left.len() < right.len() {
            quicksort(left, cmp);
            rest = right;
        } else {
            quicksort(right, cmp);
            rest = left;
        }
    }
}

/// Index of the median of the first, middle, and last elements.
fn median_of_three(data: &[i64], cmp: &dyn Compare) -> usize {
    let lo = 0;
    let mid = data.len() / 2;
    let hi = data.len() - 1;
    let le = |i: usize, j: usize| cmp.compare(data[i], data[j]) != Ordering::Greater;
    if le(lo, mid) {
        if le(mid, hi) {
            mid
        } else if le(lo, hi) {
            hi
        } else {
            lo
        }
    } else if le(lo, hi) {
        lo
    } else if le(mid, hi) {
        hi
    } else {
        mid
    }
}

/// Lomuto partition with the pivot parked at the last index. Returns the
/// pivot's final position.
fn partition(data: &mut [i64], cmp: &dyn Compare) -> usize {
    let last = data.len() - 1;
    let pivot = data[last];
    let mut store = 0;
    for index in 0..last {
        if cmp.compare(data[index], pivot) != Ordering::Greater {
            data.swap(store, index);
            store += 1;
        }
    }
    data.swap(store, last);
    store
}

fn insertion_sort(data: &mut [i64], cmp: &dyn Compare) {
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && cmp.compare(data[j - 1], data[j]) == Ordering::Greater {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
}
