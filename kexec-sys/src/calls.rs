//! Typed wrappers over the raw trampolines

use core::convert::Infallible;
use core::ffi::CStr;

use crate::arch::{syscall0, syscall1, syscall3, syscall4, syscall5};
use crate::errno::Errno;
use crate::nr::*;
use crate::types::*;
use crate::Fd;

/// Arguments for one `kexec_file_load(2)` call
///
/// The command line travels as a pointer plus an explicit length that
/// includes the terminating NUL. A request is consumed by [`submit`], so it
/// can't be replayed.
///
/// [`submit`]: LoadRequest::submit
#[derive(Debug)]
pub struct LoadRequest<'a> {
    kernel_fd: Fd,
    initrd_fd: Fd,
    cmdline: &'a CStr,
    flags: KexecFileFlags,
}

impl<'a> LoadRequest<'a> {
    pub fn new(kernel_fd: Fd, initrd_fd: Fd, cmdline: &'a CStr, flags: KexecFileFlags) -> Self {
        Self {
            kernel_fd,
            initrd_fd,
            cmdline,
            flags,
        }
    }

    /// Command line length as passed to the kernel, terminator included
    pub fn cmdline_len(&self) -> usize {
        self.cmdline.to_bytes_with_nul().len()
    }

    /// Flag bits OR-ed with the architecture field
    pub fn flags_word(&self) -> u64 {
        self.flags.bits() | KEXEC_ARCH_DEFAULT
    }

    /// Stage the kernel. `Success(0)` means it is resident and ready.
    pub fn submit(self) -> SyscallResult {
        sys_trace!(
            "kexec_file_load(kernel_fd={}, initrd_fd={}, cmdline_len={}, flags={:#x})",
            self.kernel_fd,
            self.initrd_fd,
            self.cmdline_len(),
            self.flags_word()
        );
        // SAFETY: the pointer/length pair describes `self.cmdline`, which
        // outlives the call; the kernel only reads from it.
        let ret = unsafe {
            syscall5(
                SYS_KEXEC_FILE_LOAD,
                self.kernel_fd as usize,
                self.initrd_fd as usize,
                self.cmdline_len(),
                self.cmdline.as_ptr() as usize,
                self.flags_word() as usize,
            )
        };
        SyscallResult::from_raw(ret)
    }
}

/// Write to a file descriptor without any buffering in between
pub fn write(fd: Fd, buf: &[u8]) -> SyscallResult {
    // SAFETY: pointer and length come from a live slice.
    let ret = unsafe { syscall3(SYS_WRITE, fd as usize, buf.as_ptr() as usize, buf.len()) };
    SyscallResult::from_raw(ret)
}

/// Commit all buffered filesystem data to disk
///
/// `sync(2)` has no failure mode worth acting on, so the result is dropped.
pub fn sync() {
    sys_trace!("sync()");
    // SAFETY: takes no arguments.
    let _ = unsafe { syscall0(SYS_SYNC) };
}

/// Hand off to the kernel staged by `kexec_file_load`
///
/// Never returns on success. Whatever comes back is an error; a zero return
/// without a handoff is reported as [`Errno::EOK`].
pub fn reboot_kexec() -> Result<Infallible, Errno> {
    sys_debug!("reboot(LINUX_REBOOT_CMD_KEXEC)");
    // SAFETY: the argument pointer is null, which LINUX_REBOOT_CMD_KEXEC
    // never dereferences.
    let ret = unsafe {
        syscall4(
            SYS_REBOOT,
            LINUX_REBOOT_MAGIC1 as usize,
            LINUX_REBOOT_MAGIC2 as usize,
            LINUX_REBOOT_CMD_KEXEC as usize,
            0,
        )
    };
    Err(SyscallResult::from_raw(ret).error_value().unwrap_or(Errno::EOK))
}

/// Terminate every thread of the process immediately
pub fn exit(status: i32) -> ! {
    // SAFETY: exit_group takes a plain integer.
    unsafe {
        syscall1(SYS_EXIT_GROUP, status as usize);
    }
    unreachable!("exit_group returned")
}

/// Effective user id of the calling process
pub fn geteuid() -> Result<u32, Errno> {
    // SAFETY: takes no arguments.
    let ret = unsafe { syscall0(SYS_GETEUID) };
    SyscallResult::from_raw(ret).into_result().map(|uid| uid as u32)
}
