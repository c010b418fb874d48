//! Syscall gateway
//!
//! The sequencer only ever reaches the kernel through [`SyscallGateway`].
//! [`LinuxGateway`] forwards each method to the matching raw call in
//! `kexec-sys`; tests substitute a mock.

use core::convert::Infallible;
use std::ffi::CStr;
use std::os::fd::RawFd;

use kexec_sys::{Errno, KexecFileFlags, LoadRequest, SyscallResult};

/// Privileged operations the kexec sequence needs
#[cfg_attr(test, mockall::automock)]
pub trait SyscallGateway {
    /// Stage a kernel and initrd with the given command line
    fn kexec_file_load(
        &self,
        kernel_fd: RawFd,
        initrd_fd: RawFd,
        cmdline: &CStr,
        flags: KexecFileFlags,
    ) -> SyscallResult;

    /// Flush buffered writes to disk. Advisory; nothing to check.
    fn sync(&self);

    /// Reboot into the staged kernel. Only ever returns on failure.
    fn reboot_kexec(&self) -> Result<Infallible, Errno>;

    /// Unbuffered write to a file descriptor
    fn write(&self, fd: RawFd, buf: &[u8]) -> SyscallResult;
}

/// Gateway backed by the real system calls
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxGateway;

impl LinuxGateway {
    pub fn new() -> Self {
        LinuxGateway
    }

    /// End the process right here, without unwinding or destructors
    pub fn terminate(&self, status: i32) -> ! {
        if kexec_sys::PLATFORM_SUPPORTED {
            kexec_sys::exit(status)
        } else {
            std::process::exit(status)
        }
    }
}

impl SyscallGateway for LinuxGateway {
    fn kexec_file_load(
        &self,
        kernel_fd: RawFd,
        initrd_fd: RawFd,
        cmdline: &CStr,
        flags: KexecFileFlags,
    ) -> SyscallResult {
        LoadRequest::new(kernel_fd, initrd_fd, cmdline, flags).submit()
    }

    fn sync(&self) {
        kexec_sys::sync()
    }

    fn reboot_kexec(&self) -> Result<Infallible, Errno> {
        kexec_sys::reboot_kexec()
    }

    fn write(&self, fd: RawFd, buf: &[u8]) -> SyscallResult {
        kexec_sys::write(fd, buf)
    }
}
