//! Syscall result and argument types

use bitflags::bitflags;
use static_assertions::const_assert_eq;

use crate::errno::Errno;

// Arguments are marshalled as full-width registers. Only checked where real
// trampolines exist; other targets build the stubs.
#[cfg(all(
    target_os = "linux",
    any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "riscv64")
))]
static_assertions::assert_eq_size!(usize, u64);

/// System call result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallResult {
    /// Success with return value
    Success(usize),
    /// Error with decoded errno
    Error(Errno),
}

impl SyscallResult {
    /// Decodes a raw return register.
    ///
    /// Only `-4095..=-1` encodes an error; anything else is a value.
    pub fn from_raw(ret: isize) -> Self {
        if (-(Errno::MAX as isize)..0).contains(&ret) {
            SyscallResult::Error(Errno::new(-ret as i32))
        } else {
            SyscallResult::Success(ret as usize)
        }
    }

    pub fn to_isize(self) -> isize {
        match self {
            SyscallResult::Success(value) => value as isize,
            SyscallResult::Error(errno) => -(errno.raw() as isize),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SyscallResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SyscallResult::Error(_))
    }

    pub fn success_value(&self) -> Option<usize> {
        match self {
            SyscallResult::Success(value) => Some(*value),
            _ => None,
        }
    }

    pub fn error_value(&self) -> Option<Errno> {
        match self {
            SyscallResult::Error(errno) => Some(*errno),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<usize, Errno> {
        match self {
            SyscallResult::Success(value) => Ok(value),
            SyscallResult::Error(errno) => Err(errno),
        }
    }
}

bitflags! {
    /// `kexec_file_load(2)` flag bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KexecFileFlags: u64 {
        /// Unload the currently staged image instead of loading one
        const UNLOAD = 0x0000_0001;
        /// Stage a crash kernel instead of a normal one
        const ON_CRASH = 0x0000_0002;
        /// Ignore the initrd descriptor
        const NO_INITRAMFS = 0x0000_0004;
    }
}

/// Architecture field of the flags word: "same as the running kernel"
pub const KEXEC_ARCH_DEFAULT: u64 = 0 << 16;

// ============================================================================
// reboot(2) arguments
// ============================================================================

pub const LINUX_REBOOT_MAGIC1: u32 = 0xfee1_dead;
pub const LINUX_REBOOT_MAGIC2: u32 = 672_274_793;
pub const LINUX_REBOOT_CMD_KEXEC: u32 = 0x4558_4543;

const_assert_eq!(LINUX_REBOOT_MAGIC2, 0x2812_1969);
const_assert_eq!(KEXEC_ARCH_DEFAULT, 0);
