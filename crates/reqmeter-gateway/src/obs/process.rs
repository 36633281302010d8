//! Default process metrics.
//!
//! The start time is set once at registration. The memory, fd and thread
//! gauges are refreshed from `/proc/self` on every scrape; on other platforms
//! they are registered but never set, so only their headers are exported.

use std::time::{SystemTime, UNIX_EPOCH};

use reqmeter_core::error::Result;
use reqmeter_core::{Gauge, Registry};

pub const PROCESS_START_TIME_SECONDS: &str = "process_start_time_seconds";
pub const PROCESS_RESIDENT_MEMORY_BYTES: &str = "process_resident_memory_bytes";
pub const PROCESS_VIRTUAL_MEMORY_BYTES: &str = "process_virtual_memory_bytes";
pub const PROCESS_OPEN_FDS: &str = "process_open_fds";
pub const PROCESS_MAX_FDS: &str = "process_max_fds";
pub const PROCESS_THREADS: &str = "process_threads";

/// One `/proc/self` reading. Fields stay `None` when unavailable.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessSample {
    pub resident_memory_bytes: Option<f64>,
    pub virtual_memory_bytes: Option<f64>,
    pub open_fds: Option<f64>,
    pub max_fds: Option<f64>,
    pub threads: Option<f64>,
}

#[derive(Clone)]
pub struct ProcessMetrics {
    resident_memory: Gauge,
    virtual_memory: Gauge,
    open_fds: Gauge,
    max_fds: Gauge,
    threads: Gauge,
}

impl ProcessMetrics {
    pub fn register(registry: &mut Registry) -> Result<Self> {
        let start = registry.register_gauge(
            PROCESS_START_TIME_SECONDS,
            "Start time of the process since unix epoch in seconds",
            &[],
        )?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        start.set(&[], now)?;

        Ok(Self {
            resident_memory: registry.register_gauge(
                PROCESS_RESIDENT_MEMORY_BYTES,
                "Resident memory size in bytes",
                &[],
            )?,
            virtual_memory: registry.register_gauge(
                PROCESS_VIRTUAL_MEMORY_BYTES,
                "Virtual memory size in bytes",
                &[],
            )?,
            open_fds: registry.register_gauge(
                PROCESS_OPEN_FDS,
                "Number of open file descriptors",
                &[],
            )?,
            max_fds: registry.register_gauge(
                PROCESS_MAX_FDS,
                "Maximum number of open file descriptors",
                &[],
            )?,
            threads: registry.register_gauge(PROCESS_THREADS, "Number of OS threads", &[])?,
        })
    }

    /// Read `/proc/self` and update the gauges. Only called from the scrape path.
    pub fn refresh(&self) {
        self.apply(&sample());
    }

    pub fn apply(&self, s: &ProcessSample) {
        let pairs = [
            (&self.resident_memory, s.resident_memory_bytes),
            (&self.virtual_memory, s.virtual_memory_bytes),
            (&self.open_fds, s.open_fds),
            (&self.max_fds, s.max_fds),
            (&self.threads, s.threads),
        ];
        for (gauge, value) in pairs {
            let Some(v) = value else { continue };
            if let Err(e) = gauge.set(&[], v) {
                tracing::warn!(metric = gauge.name(), error = %e, "process metric update failed");
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn sample() -> ProcessSample {
    let mut s = std::fs::read_to_string("/proc/self/status")
        .map(|status| parse_status(&status))
        .unwrap_or_default();

    if let Ok(entries) = std::fs::read_dir("/proc/self/fd") {
        s.open_fds = Some(entries.count() as f64);
    }
    if let Ok(limits) = std::fs::read_to_string("/proc/self/limits") {
        s.max_fds = parse_max_open_files(&limits);
    }
    s
}

#[cfg(not(target_os = "linux"))]
fn sample() -> ProcessSample {
    ProcessSample::default()
}

/// `VmRSS`, `VmSize` (kB) and `Threads` from `/proc/self/status`.
pub fn parse_status(status: &str) -> ProcessSample {
    let mut s = ProcessSample::default();
    for line in status.lines() {
        let Some((key, rest)) = line.split_once(':') else { continue };
        let value = rest.split_whitespace().next().and_then(|v| v.parse::<f64>().ok());
        match key {
            "VmRSS" => s.resident_memory_bytes = value.map(|kb| kb * 1024.0),
            "VmSize" => s.virtual_memory_bytes = value.map(|kb| kb * 1024.0),
            "Threads" => s.threads = value,
            _ => {}
        }
    }
    s
}

/// Soft limit from the `Max open files` row of `/proc/self/limits`.
/// `unlimited` yields `None`.
pub fn parse_max_open_files(limits: &str) -> Option<f64> {
    limits
        .lines()
        .find_map(|line| line.strip_prefix("Max open files"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|soft| soft.parse().ok())
}
