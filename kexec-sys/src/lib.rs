//! Raw Linux system calls for kexec
//!
//! This crate is the only place that talks to the kernel directly. It exposes
//! the handful of operations needed to replace the running kernel:
//!
//! - **kexec_file_load**: stage a new kernel and initrd in memory
//! - **sync**: commit buffered writes to disk
//! - **reboot**: jump into the staged kernel
//! - **write**: unbuffered output to a file descriptor
//! - **exit_group**: immediate process termination
//!
//! plus `geteuid`, which the caller uses to check privilege before touching
//! any of the above.
//!
//! Every call is issued by its numeric code through an inline-asm trampoline;
//! nothing goes through libc.
//!
//! # Usage
//!
//! ```no_run
//! use kexec_sys::{write, STDOUT};
//!
//! let written = write(STDOUT, b"hello\n");
//! assert!(written.is_success());
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
mod logging;

mod arch;
mod calls;
mod errno;
mod nr;
mod types;

pub use calls::{exit, geteuid, reboot_kexec, sync, write, LoadRequest};
pub use errno::Errno;
pub use nr::*;
pub use types::*;

/// True when this build carries real trampolines for the running target.
///
/// On every other OS/architecture the trampolines return `-ENOSYS`.
pub const PLATFORM_SUPPORTED: bool = arch::SUPPORTED;

/// File descriptor as the kernel sees it
pub type Fd = core::ffi::c_int;

// ============================================================================
// Standard file descriptors
// ============================================================================

pub const STDOUT: Fd = 1;
pub const STDERR: Fd = 2;
