use anyhow::Result;
use std::sync::{Arc, Mutex};
use sysinfo::{Pid, System};

/// Introspection handle for the process the agent is attached to.
///
/// Wraps a shared `sysinfo` system so every collector sampling the same
/// process reuses one refresh state. Cloning is cheap and keeps pointing at
/// the same underlying system.
#[derive(Debug, Clone)]
pub struct HostHandle {
    pid: Pid,
    system: Arc<Mutex<System>>,
}

/// Point-in-time stats for the attached process.
#[derive(Debug, Clone, Copy)]
pub struct HostSample {
    pub cpu_percent: f64,
    pub memory_bytes: u64,
    pub virtual_memory_bytes: u64,
    pub run_time_seconds: u64,
    pub disk_read_bytes: u64,
    pub disk_written_bytes: u64,
}

impl HostHandle {
    /// Handle on the agent's own process.
    pub fn current() -> Result<Self> {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| anyhow::anyhow!("Failed to determine current PID: {}", e))?;
        Self::attach(pid.as_u32())
    }

    /// Handle on an already-running process.
    pub fn attach(pid: u32) -> Result<Self> {
        let pid = Pid::from_u32(pid);
        let mut system = System::new();
        system.refresh_process(pid);
        if system.process(pid).is_none() {
            anyhow::bail!("No such process: {}", pid);
        }

        Ok(Self {
            pid,
            system: Arc::new(Mutex::new(system)),
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid.as_u32()
    }

    /// Refresh and read the process stats. Returns `None` once the process
    /// is no longer visible.
    pub fn sample(&self) -> Option<HostSample> {
        let mut system = self.system.lock().unwrap();
        if !system.refresh_process(self.pid) {
            return None;
        }
        let process = system.process(self.pid)?;
        let disk_usage = process.disk_usage();

        Some(HostSample {
            cpu_percent: process.cpu_usage() as f64,
            memory_bytes: process.memory(),
            virtual_memory_bytes: process.virtual_memory(),
            run_time_seconds: process.run_time(),
            disk_read_bytes: disk_usage.total_read_bytes,
            disk_written_bytes: disk_usage.total_written_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_process_sample() {
        let host = HostHandle::current().unwrap();
        let sample = host.sample().unwrap();
        assert!(sample.memory_bytes > 0);
    }

    #[test]
    fn test_sample_is_none_once_process_is_gone() {
        let mut child = std::process::Command::new("sleep")
            .arg("60")
            .spawn()
            .unwrap();

        let host = HostHandle::attach(child.id()).unwrap();
        assert!(host.sample().is_some());

        child.kill().unwrap();
        child.wait().unwrap();

        assert!(host.sample().is_none());
    }

    #[test]
    fn test_attach_nonexistent_pid() {
        // PIDs this large are not handed out on any supported platform.
        let result = HostHandle::attach(u32::MAX - 1);
        assert!(result.is_err());
    }
}
