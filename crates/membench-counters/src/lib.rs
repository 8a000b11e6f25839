//! Phase-cost accounting for the membench drivers.
//!
//! A benchmark phase is bracketed by two [`Snapshot`]s; [`delta`] turns the
//! pair into a [`PhaseCost`] and [`CounterSource::report`] emits it under a
//! phase label. Every counter is optional: a backend records whatever the
//! platform exposes and leaves the rest absent, so the drivers run the same
//! control flow whether or not any counter facility is available.

mod host;
mod noop;
#[cfg(target_os = "linux")]
mod perf;

pub use host::{HostCounters, ReportFormat};
pub use noop::NoopCounters;

use serde::Serialize;
use std::fmt::Write as _;

/// Counter bank captured at one point in time.
///
/// Wall time is measured from the backend's own origin, so snapshots are only
/// comparable when they come from the same source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Nanoseconds of wall time since the source was created.
    pub wall_ns: Option<u64>,
    /// User-mode CPU time of the process, in nanoseconds.
    pub user_cpu_ns: Option<u64>,
    /// User-mode retired instructions of this thread.
    pub instructions: Option<u64>,
}

impl Snapshot {
    /// A snapshot with every counter absent, as returned by inert sources.
    pub fn inert() -> Self {
        Self::default()
    }
}

/// Cost attributed to the interval between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_cpu_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<u64>,
}

impl PhaseCost {
    /// True when no counter was available on either side of the interval.
    pub fn is_empty(&self) -> bool {
        self.wall_ns.is_none() && self.user_cpu_ns.is_none() && self.instructions.is_none()
    }
}

/// Difference between two snapshots taken from the same source.
///
/// A counter contributes only when both snapshots carry it; mismatched sides
/// (for example a perf counter that failed mid-run) drop the counter rather
/// than report a bogus value.
pub fn delta(end: &Snapshot, start: &Snapshot) -> PhaseCost {
    fn sub(end: Option<u64>, start: Option<u64>) -> Option<u64> {
        Some(end?.saturating_sub(start?))
    }
    PhaseCost {
        wall_ns: sub(end.wall_ns, start.wall_ns),
        user_cpu_ns: sub(end.user_cpu_ns, start.user_cpu_ns),
        instructions: sub(end.instructions, start.instructions),
    }
}

/// The tripartite snapshot/delta/report contract the drivers depend on.
pub trait CounterSource {
    /// Capture the current counter bank.
    fn snapshot(&mut self) -> Snapshot;

    /// Emit one labeled cost report. Empty costs are silently skipped.
    fn report(&self, label: &str, cost: &PhaseCost) {
        if cost.is_empty() {
            return;
        }
        print!("{}", render_plain(label, cost));
    }
}

/// Human-readable rendering, one line per present counter.
pub fn render_plain(label: &str, cost: &PhaseCost) -> String {
    let mut out = String::new();
    if let Some(v) = cost.wall_ns {
        let _ = writeln!(out, "{label}: wall time (ns)          {v:>14}");
    }
    if let Some(v) = cost.user_cpu_ns {
        let _ = writeln!(out, "{label}: user CPU time (ns)      {v:>14}");
    }
    if let Some(v) = cost.instructions {
        let _ = writeln!(out, "{label}: user instructions       {v:>14}");
    }
    out
}

/// Machine-readable rendering: a single JSON object with the label inlined.
pub fn render_json(label: &str, cost: &PhaseCost) -> String {
    #[derive(Serialize)]
    struct Line<'a> {
        label: &'a str,
        #[serde(flatten)]
        cost: &'a PhaseCost,
    }
    serde_json::to_string(&Line { label, cost }).unwrap_or_default()
}

/// Best counter source this build provides.
///
/// With the `host-counters` feature (default) this is [`HostCounters`];
/// without it the drivers get an inert source and report nothing, keeping
/// the selection out of driver logic entirely.
#[cfg(feature = "host-counters")]
pub fn default_source(format: ReportFormat) -> Box<dyn CounterSource> {
    Box::new(HostCounters::with_format(format))
}

#[cfg(not(feature = "host-counters"))]
pub fn default_source(format: ReportFormat) -> Box<dyn CounterSource> {
    let _ = format;
    Box::new(NoopCounters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_subtracts_matching_counters() {
        let start = Snapshot {
            wall_ns: Some(100),
            user_cpu_ns: Some(40),
            instructions: Some(1_000),
        };
        let end = Snapshot {
            wall_ns: Some(350),
            user_cpu_ns: Some(90),
            instructions: Some(7_500),
        };
        let cost = delta(&end, &start);
        assert_eq!(cost.wall_ns, Some(250));
        assert_eq!(cost.user_cpu_ns, Some(50));
        assert_eq!(cost.instructions, Some(6_500));
    }

    #[test]
    fn delta_drops_one_sided_counters() {
        let start = Snapshot {
            wall_ns: Some(100),
            user_cpu_ns: None,
            instructions: Some(5),
        };
        let end = Snapshot {
            wall_ns: Some(200),
            user_cpu_ns: Some(90),
            instructions: None,
        };
        let cost = delta(&end, &start);
        assert_eq!(cost.wall_ns, Some(100));
        assert_eq!(cost.user_cpu_ns, None);
        assert_eq!(cost.instructions, None);
    }

    #[test]
    fn delta_of_inert_snapshots_is_empty() {
        let cost = delta(&Snapshot::inert(), &Snapshot::inert());
        assert!(cost.is_empty());
    }

    #[test]
    fn delta_saturates_instead_of_underflowing() {
        let start = Snapshot {
            wall_ns: Some(500),
            ..Snapshot::inert()
        };
        let end = Snapshot {
            wall_ns: Some(400),
            ..Snapshot::inert()
        };
        assert_eq!(delta(&end, &start).wall_ns, Some(0));
    }

    #[test]
    fn plain_rendering_includes_only_present_counters() {
        let cost = PhaseCost {
            wall_ns: Some(123),
            user_cpu_ns: None,
            instructions: Some(456),
        };
        let text = render_plain("-initial-malloc", &cost);
        assert!(text.contains("-initial-malloc: wall time"));
        assert!(text.contains("123"));
        assert!(!text.contains("CPU"));
        assert!(text.contains("user instructions"));
    }

    #[test]
    fn json_rendering_round_trips() {
        let cost = PhaseCost {
            wall_ns: Some(99),
            user_cpu_ns: Some(42),
            instructions: None,
        };
        let line = render_json("-benchmark-loop", &cost);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["label"], "-benchmark-loop");
        assert_eq!(value["wall_ns"], 99);
        assert_eq!(value["user_cpu_ns"], 42);
        assert!(value.get("instructions").is_none());
    }
}
