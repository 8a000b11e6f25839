//! Minimal `perf_event_open` binding for a single instruction counter.
//!
//! The attr struct is declared locally at `PERF_ATTR_SIZE_VER5` (112 bytes);
//! the kernel uses the embedded `size` field to accept older layouts, so no
//! binding crate is needed for one fixed counter.

use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

const PERF_TYPE_HARDWARE: u32 = 0;
const PERF_COUNT_HW_INSTRUCTIONS: u64 = 1;

// Bit positions in the perf_event_attr flag word.
const ATTR_EXCLUDE_KERNEL: u64 = 1 << 5;
const ATTR_EXCLUDE_HV: u64 = 1 << 6;

#[repr(C)]
#[derive(Clone, Copy, Default)]
struct PerfEventAttr {
    type_: u32,
    size: u32,
    config: u64,
    sample_period: u64,
    sample_type: u64,
    read_format: u64,
    flags: u64,
    wakeup_events: u32,
    bp_type: u32,
    config1: u64,
    config2: u64,
    branch_sample_type: u64,
    sample_regs_user: u64,
    sample_stack_user: u32,
    clockid: i32,
    sample_regs_intr: u64,
    aux_watermark: u32,
    sample_max_stack: u16,
    reserved_2: u16,
}

/// An open, counting perf fd for user-mode retired instructions on the
/// calling thread.
pub(crate) struct PerfHandle {
    fd: OwnedFd,
}

impl PerfHandle {
    pub(crate) fn open() -> io::Result<Self> {
        let attr = PerfEventAttr {
            type_: PERF_TYPE_HARDWARE,
            size: std::mem::size_of::<PerfEventAttr>() as u32,
            config: PERF_COUNT_HW_INSTRUCTIONS,
            flags: ATTR_EXCLUDE_KERNEL | ATTR_EXCLUDE_HV,
            ..PerfEventAttr::default()
        };
        // SAFETY: attr is a fully initialized struct of the size announced in
        // its own size field; pid 0 / cpu -1 counts the calling thread on any
        // CPU and requires no group fd.
        let fd = unsafe {
            libc::syscall(
                libc::SYS_perf_event_open,
                &raw const attr,
                0 as libc::pid_t,
                -1 as libc::c_int,
                -1 as libc::c_int,
                0 as libc::c_ulong,
            )
        };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: the syscall succeeded and returned a fresh fd we now own.
        let fd = unsafe { OwnedFd::from_raw_fd(fd as i32) };
        Ok(Self { fd })
    }

    pub(crate) fn read(&mut self) -> Option<u64> {
        let mut value: u64 = 0;
        // SAFETY: reading exactly 8 bytes into a valid u64; a counting perf
        // fd yields the current counter value.
        let n = unsafe {
            libc::read(
                self.fd.as_raw_fd(),
                (&raw mut value).cast::<libc::c_void>(),
                std::mem::size_of::<u64>(),
            )
        };
        (n == std::mem::size_of::<u64>() as isize).then_some(value)
    }
}
