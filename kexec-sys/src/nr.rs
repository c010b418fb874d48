//! System call numbers
//!
//! x86_64 has its own table; aarch64 and riscv64 share the generic one.

#[cfg(target_arch = "x86_64")]
mod table {
    pub const SYS_WRITE: usize = 1;
    pub const SYS_GETEUID: usize = 107;
    pub const SYS_SYNC: usize = 162;
    pub const SYS_REBOOT: usize = 169;
    pub const SYS_EXIT_GROUP: usize = 231;
    pub const SYS_KEXEC_FILE_LOAD: usize = 320;
}

#[cfg(not(target_arch = "x86_64"))]
mod table {
    pub const SYS_WRITE: usize = 64;
    pub const SYS_SYNC: usize = 81;
    pub const SYS_EXIT_GROUP: usize = 94;
    pub const SYS_REBOOT: usize = 142;
    pub const SYS_GETEUID: usize = 175;
    pub const SYS_KEXEC_FILE_LOAD: usize = 294;
}

pub use table::*;
