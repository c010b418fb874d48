//! System call tests

use std::ffi::CString;

use kexec_sys::*;

#[test]
fn test_syscall_result() {
    let success = SyscallResult::Success(42);
    assert_eq!(success.to_isize(), 42);

    let error = SyscallResult::Error(Errno::ENOENT);
    assert_eq!(error.to_isize(), -2);

    assert_eq!(SyscallResult::from_raw(42), SyscallResult::Success(42));
    assert_eq!(SyscallResult::from_raw(-2), SyscallResult::Error(Errno::ENOENT));
    assert_eq!(SyscallResult::from_raw(-16).into_result(), Err(Errno::EBUSY));
}

#[test]
fn test_reboot_constants() {
    assert_eq!(LINUX_REBOOT_MAGIC1, 0xfee1dead);
    assert_eq!(LINUX_REBOOT_MAGIC2, 672274793);
    assert_eq!(LINUX_REBOOT_CMD_KEXEC, 0x45584543);
}

#[test]
fn test_load_request_counts_terminator() {
    let cmdline = CString::new("BOOT_IMAGE=/new/vmlinuz root=/dev/sda1 quiet").unwrap();
    let request = LoadRequest::new(3, 4, &cmdline, KexecFileFlags::empty());
    assert_eq!(request.cmdline_len(), cmdline.as_bytes().len() + 1);
    assert_eq!(request.flags_word(), 0);
}

#[test]
fn test_load_request_flags_word() {
    let cmdline = CString::new("").unwrap();
    let request = LoadRequest::new(-1, -1, &cmdline, KexecFileFlags::UNLOAD);
    assert_eq!(request.cmdline_len(), 1);
    assert_eq!(request.flags_word(), 1);
}

#[cfg(all(
    target_os = "linux",
    any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "riscv64")
))]
mod live {
    use super::*;

    #[test]
    fn test_platform_supported() {
        assert!(PLATFORM_SUPPORTED);
    }

    #[test]
    fn test_write_empty_buffer() {
        assert_eq!(write(STDOUT, b""), SyscallResult::Success(0));
    }

    #[test]
    fn test_write_bad_descriptor() {
        assert_eq!(write(-1, b"x"), SyscallResult::Error(Errno::EBADF));
    }

    #[test]
    fn test_geteuid() {
        assert!(geteuid().is_ok());
    }
}
