//! Current-process readings backed by `sysinfo`.

use std::sync::Mutex;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessSampleError {
    #[error("current pid unavailable: {0}")]
    Pid(&'static str),
    #[error("process {0} not found after refresh")]
    Gone(Pid),
    #[error("process sampler lock poisoned")]
    Poisoned,
}

/// One refresh worth of process figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSnapshot {
    pub cpu_seconds: f64,
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

/// Refreshes only this process on every read.
pub struct ProcessSampler {
    system: Mutex<System>,
    pid: Pid,
}

impl ProcessSampler {
    pub fn current() -> Result<Self, ProcessSampleError> {
        let pid = sysinfo::get_current_pid().map_err(ProcessSampleError::Pid)?;
        Ok(Self {
            system: Mutex::new(System::new()),
            pid,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn snapshot(&self) -> Result<ProcessSnapshot, ProcessSampleError> {
        let mut system = self.system.lock().map_err(|_| ProcessSampleError::Poisoned)?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );

        let process = system
            .process(self.pid)
            .ok_or(ProcessSampleError::Gone(self.pid))?;

        Ok(ProcessSnapshot {
            // milliseconds
            cpu_seconds: process.accumulated_cpu_time() as f64 / 1000.0,
            resident_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        })
    }
}
