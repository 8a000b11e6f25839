//! # membench-core
//!
//! Deterministic microbenchmark drivers for two subjects under test: a
//! general-purpose memory allocator (four-phase allocate/free/realloc
//! workload) and a sorting routine (repeated sorts of an adversarially
//! ordered buffer).
//!
//! The subjects themselves are black boxes behind the [`alloc::BenchAllocator`]
//! and [`sort::SortRoutine`] traits; phase costs flow through the
//! `membench-counters` snapshot/delta/report contract. Everything in this
//! crate is single-threaded and reproducible from a caller-supplied seed.

#![deny(unsafe_code)]

pub mod alloc;
pub mod error;
pub mod sort;
pub mod workload;

pub use error::UsageError;
