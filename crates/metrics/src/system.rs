//! System readings backing the process gauges.

use std::time::Instant;

use parking_lot::Mutex;
use sysinfo::{Disks, Pid, ProcessesToUpdate, System};

/// Samples process and host readings for reports and gauges.
///
/// Construct one at startup and share it. Uptime counts from construction,
/// so the construction point defines what "process start" means in reports.
#[derive(Debug)]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started_at: Instant,
}

/// One reading of process and host state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SystemSample {
    /// Memory used by this process, in bytes.
    pub process_memory_bytes: u64,

    /// Total memory of the host, in bytes.
    pub total_memory_bytes: u64,

    /// Host-wide CPU usage percentage.
    ///
    /// CPU usage is measured between consecutive refreshes, so the first
    /// sample after startup may read zero.
    pub cpu_usage_percent: f64,

    /// Used disk space across all mounted disks, in bytes.
    pub disk_used_bytes: u64,

    /// Total disk space across all mounted disks, in bytes.
    pub disk_total_bytes: u64,
}

impl SystemMonitor {
    /// Creates a monitor and starts the uptime clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            pid: sysinfo::get_current_pid().ok(),
            started_at: Instant::now(),
        }
    }

    /// Seconds elapsed since the monitor was created.
    #[must_use]
    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Memory used by this process, in bytes.
    ///
    /// Reads zero when the current process cannot be inspected.
    #[must_use]
    pub fn process_memory_bytes(&self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };

        let mut system = self.system.lock();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).map_or(0, sysinfo::Process::memory)
    }

    /// Takes a full reading of process and host state.
    #[must_use]
    pub fn sample(&self) -> SystemSample {
        let mut system = self.system.lock();

        if let Some(pid) = self.pid {
            system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        }
        system.refresh_memory();
        system.refresh_cpu_usage();

        let process_memory_bytes = self
            .pid
            .and_then(|pid| system.process(pid))
            .map_or(0, sysinfo::Process::memory);

        let disks = Disks::new_with_refreshed_list();
        let disk_total_bytes: u64 = disks.iter().map(sysinfo::Disk::total_space).sum();
        let disk_available_bytes: u64 = disks.iter().map(sysinfo::Disk::available_space).sum();

        SystemSample {
            process_memory_bytes,
            total_memory_bytes: system.total_memory(),
            cpu_usage_percent: f64::from(system.global_cpu_usage()),
            disk_used_bytes: disk_total_bytes.saturating_sub(disk_available_bytes),
            disk_total_bytes,
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}
