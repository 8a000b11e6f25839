//! Usage-error taxonomy shared by both benchmark drivers.

use thiserror::Error;

/// Fatal configuration errors, raised before any benchmark side effect.
///
/// These are the only errors the drivers produce. Failures of the subject
/// under test (a `None` handle from the allocator) are deliberately passed
/// through untreated, and counter-facility unavailability never surfaces
/// as an error at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("invalid number of items: {requested} (table holds at most {capacity})")]
    ElementCount { requested: usize, capacity: usize },

    #[error("iterations must be at least 1: {0}")]
    Iterations(u64),

    #[error("bufsize must be between 1 and {capacity}: {requested}")]
    BufferSize { requested: usize, capacity: usize },

    #[error("sort direction must be 'a' or 'd': {0:?}")]
    Direction(char),
}
