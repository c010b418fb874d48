//! kexec
//!
//! Replaces the running kernel without a firmware reboot: stage a new kernel
//! and initrd with `kexec_file_load(2)`, keep the current boot parameters
//! (pointing `BOOT_IMAGE=` at the new image), flush disks and jump.
//!
//! # Architecture
//!
//! The work is split into a few pieces that run strictly in order:
//!
//! - **Validator**: platform, privilege and input file checks
//! - **Cmdline**: rewrites the active boot command line for the new image
//! - **Gateway**: the narrow syscall surface, backed by `kexec-sys`
//! - **Sequencer**: drives validate → rewrite → load → announce → flush → reboot
//!
//! Everything platform specific stays behind [`SyscallGateway`], so the
//! sequencer can be exercised against a mock.

pub mod cli;
pub mod cmdline;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod image;
pub mod logger;
pub mod platform;
pub mod sequencer;
pub mod validator;

pub use cmdline::{BootCommandLine, RewrittenCmdline};
pub use config::KexecConfig;
pub use error::{KexecError, Result};
pub use gateway::{LinuxGateway, SyscallGateway};
pub use platform::Environment;
pub use sequencer::{Pause, Sequencer, Stage, ThreadPause};

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
pub(crate) mod testing;
