//! Allocation-phase benchmark over the process heap.
//!
//! Runs the four-phase allocate/free/realloc workload against the global
//! allocator and prints one labeled cost report per phase plus the
//! full-run total.

use clap::Parser;

use membench_core::alloc::{AllocBench, AllocEvent, MAX_ALLOCATIONS};
use membench_core::workload::WorkloadGenerator;
use membench_counters::ReportFormat;
use membench_harness::SystemHeap;

/// Multi-phase allocator stress benchmark.
#[derive(Debug, Parser)]
#[command(name = "malloc-bench")]
struct Cli {
    /// Number of table slots to exercise.
    #[arg(short, long, default_value_t = MAX_ALLOCATIONS)]
    elements: usize,

    /// Seed for the workload size stream (decimal or 0x-prefixed hex).
    #[arg(short, long, default_value = "0xc", value_parser = membench_harness::parse_seed)]
    seed: u64,

    /// Increase progress detail (repeat for per-operation lines).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Reset verbosity to zero.
    #[arg(short, long)]
    quiet: bool,

    /// Emit phase reports as JSON lines instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli: Cli = membench_harness::parse_or_exit();
    let verbosity = if cli.quiet { 0 } else { cli.verbose };
    let format = if cli.json {
        ReportFormat::Json
    } else {
        ReportFormat::Plain
    };

    let mut counters = membench_counters::default_source(format);
    let mut sizes = WorkloadGenerator::new(cli.seed);
    let mut bench = AllocBench::new(SystemHeap);

    println!("Running benchmark with {} allocations...", cli.elements);
    let result = bench.run(cli.elements, &mut sizes, counters.as_mut(), &mut |event| {
        log_event(verbosity, event);
    });
    if let Err(err) = result {
        eprintln!("malloc-bench: {err}");
        std::process::exit(1);
    }
    println!("Done running benchmark");
}

fn log_event(verbosity: u8, event: AllocEvent) {
    if verbosity == 0 {
        return;
    }
    if let AllocEvent::PhaseDone(phase) = event {
        println!("{phase} phase complete");
        return;
    }
    if verbosity < 2 {
        return;
    }
    match event {
        AllocEvent::Alloc {
            index,
            size,
            populated,
        } => {
            println!(
                "malloc'd {size} bytes for slot {index}{}",
                failure_suffix(populated)
            );
        }
        AllocEvent::AllocZeroed {
            index,
            size,
            populated,
        } => {
            println!(
                "calloc'd {size} bytes for slot {index}{}",
                failure_suffix(populated)
            );
        }
        AllocEvent::Realloc {
            index,
            old_size,
            new_size,
            populated,
        } => {
            println!(
                "realloc'd slot {index}: {old_size} -> {new_size} bytes{}",
                failure_suffix(populated)
            );
        }
        AllocEvent::Free { index, size } => {
            println!("free'd {size} bytes from slot {index}");
        }
        AllocEvent::PhaseDone(_) => {}
    }
}

fn failure_suffix(populated: bool) -> &'static str {
    if populated { "" } else { " (failed)" }
}
