//! Criterion benches for the phase driver and the sort subjects.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use membench_core::alloc::AllocBench;
use membench_core::sort::{Direction, Quicksort, SortBench, SortRoutine, StdSort};
use membench_core::workload::WorkloadGenerator;
use membench_counters::NoopCounters;
use membench_harness::SystemHeap;

fn bench_alloc_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_phases");
    for &elements in &[256usize, 1024, 4096] {
        group.bench_with_input(
            BenchmarkId::new("system_heap", elements),
            &elements,
            |b, &n| {
                let mut bench = AllocBench::new(SystemHeap);
                let mut counters = NoopCounters;
                b.iter(|| {
                    let mut sizes = WorkloadGenerator::new(0xc);
                    bench
                        .run(n, &mut sizes, &mut counters, &mut |_| {})
                        .unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_sort_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_loop");
    let subjects: [(&str, &dyn SortRoutine); 2] = [("quicksort", &Quicksort), ("std", &StdSort)];
    for (name, subject) in subjects {
        group.bench_function(name, |b| {
            let mut bench = SortBench::with_capacity(4096);
            let mut counters = NoopCounters;
            b.iter(|| {
                bench
                    .run(4096, 1, Direction::Descending, subject, &mut counters)
                    .unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_alloc_phases, bench_sort_loop);
criterion_main!(benches);
