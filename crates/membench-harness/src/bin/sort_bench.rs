//! Repeated-sort benchmark over an adversarially ordered buffer.
//!
//! Initializes the buffer to a monotonic sequence, then times `iterations`
//! calls of the selected sort subject as one interval.

use clap::{Parser, ValueEnum};

use membench_core::sort::{Direction, Quicksort, SORT_CAPACITY, SortBench, SortRoutine, StdSort};
use membench_counters::ReportFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Subject {
    /// Median-of-three quicksort.
    Quicksort,
    /// The standard library's unstable sort.
    Std,
}

/// Repeated-sort benchmark with a direction-configurable indirect comparator.
#[derive(Debug, Parser)]
#[command(name = "sort-bench")]
struct Cli {
    /// Number of timed sort calls.
    #[arg(default_value_t = 10_000)]
    iterations: u64,

    /// Sort direction: 'a' (ascending) or 'd' (descending).
    #[arg(default_value_t = 'd')]
    direction: char,

    /// Number of buffer elements to sort.
    #[arg(default_value_t = SORT_CAPACITY)]
    bufsize: usize,

    /// Sort implementation to exercise.
    #[arg(long, value_enum, default_value_t = Subject::Quicksort)]
    subject: Subject,

    /// Emit the loop report as a JSON line instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli: Cli = membench_harness::parse_or_exit();
    let direction = match Direction::from_flag(cli.direction) {
        Ok(direction) => direction,
        Err(err) => {
            eprintln!("sort-bench: {err}");
            std::process::exit(1);
        }
    };
    let subject: &dyn SortRoutine = match cli.subject {
        Subject::Quicksort => &Quicksort,
        Subject::Std => &StdSort,
    };
    let format = if cli.json {
        ReportFormat::Json
    } else {
        ReportFormat::Plain
    };

    let mut counters = membench_counters::default_source(format);
    let mut bench = SortBench::new();

    println!(
        "Sorting {} elements {} times ({:?})...",
        cli.bufsize, cli.iterations, direction
    );
    if let Err(err) = bench.run(
        cli.bufsize,
        cli.iterations,
        direction,
        subject,
        counters.as_mut(),
    ) {
        eprintln!("sort-bench: {err}");
        std::process::exit(1);
    }
    println!("Done running benchmark");
}
