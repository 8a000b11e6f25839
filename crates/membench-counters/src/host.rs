//! Counter source backed by the host platform.
//!
//! Wall time comes from [`Instant`], user CPU time from
//! `getrusage(RUSAGE_SELF)` on unix, and retired user-mode instructions from
//! a `perf_event_open` counter on Linux. Each layer that fails to come up is
//! simply absent from the snapshots; nothing here is an error.

use std::time::Instant;

use crate::{CounterSource, PhaseCost, Snapshot, render_json, render_plain};

/// Output shape for [`CounterSource::report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// One aligned text line per counter.
    #[default]
    Plain,
    /// One JSON object per report.
    Json,
}

/// Wall-clock, rusage, and (where available) instruction counters.
pub struct HostCounters {
    origin: Instant,
    format: ReportFormat,
    #[cfg(target_os = "linux")]
    perf: Option<crate::perf::PerfHandle>,
}

impl HostCounters {
    pub fn new() -> Self {
        Self::with_format(ReportFormat::Plain)
    }

    pub fn with_format(format: ReportFormat) -> Self {
        Self {
            origin: Instant::now(),
            format,
            // Commonly refused by perf_event_paranoid; run without it.
            #[cfg(target_os = "linux")]
            perf: crate::perf::PerfHandle::open().ok(),
        }
    }

    /// Whether this source captures retired-instruction counts.
    pub fn has_instruction_counter(&self) -> bool {
        #[cfg(target_os = "linux")]
        {
            self.perf.is_some()
        }
        #[cfg(not(target_os = "linux"))]
        {
            false
        }
    }

    fn instructions(&mut self) -> Option<u64> {
        #[cfg(target_os = "linux")]
        {
            self.perf.as_mut().and_then(crate::perf::PerfHandle::read)
        }
        #[cfg(not(target_os = "linux"))]
        {
            None
        }
    }
}

impl Default for HostCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for HostCounters {
    fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            wall_ns: Some(self.origin.elapsed().as_nanos() as u64),
            user_cpu_ns: user_cpu_ns(),
            instructions: self.instructions(),
        }
    }

    fn report(&self, label: &str, cost: &PhaseCost) {
        if cost.is_empty() {
            return;
        }
        match self.format {
            ReportFormat::Plain => print!("{}", render_plain(label, cost)),
            ReportFormat::Json => println!("{}", render_json(label, cost)),
        }
    }
}

#[cfg(unix)]
fn user_cpu_ns() -> Option<u64> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: getrusage writes a full rusage struct through the pointer and
    // RUSAGE_SELF is always a valid target.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    // SAFETY: a zero return means the struct was initialized.
    let usage = unsafe { usage.assume_init() };
    let secs = u64::try_from(usage.ru_utime.tv_sec).ok()?;
    let micros = u64::try_from(usage.ru_utime.tv_usec).ok()?;
    Some(secs * 1_000_000_000 + micros * 1_000)
}

#[cfg(not(unix))]
fn user_cpu_ns() -> Option<u64> {
    None
}
