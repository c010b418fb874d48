//! Runtime settings for one kexec invocation

use std::path::PathBuf;
use std::time::Duration;

use kexec_sys::KexecFileFlags;
use log::LevelFilter;

/// Where the running kernel publishes its boot parameters
pub const PROC_CMDLINE: &str = "/proc/cmdline";

/// Pause between a successful load and the reboot
pub const REBOOT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct KexecConfig {
    pub cmdline_path: PathBuf,
    pub reboot_delay: Duration,
    pub load_flags: KexecFileFlags,
    pub verbosity: u32,
}

impl KexecConfig {
    pub fn new() -> Self {
        Self {
            cmdline_path: PathBuf::from(PROC_CMDLINE),
            reboot_delay: REBOOT_DELAY,
            load_flags: KexecFileFlags::empty(),
            verbosity: 0, // WARN level
        }
    }

    pub fn set_verbosity(&mut self, level: u32) {
        self.verbosity = level;
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Line printed once the kernel is staged
    pub fn countdown_notice(&self) -> String {
        format!("System will reboot in {} seconds..", self.reboot_delay.as_secs())
    }
}

impl Default for KexecConfig {
    fn default() -> Self {
        Self::new()
    }
}
