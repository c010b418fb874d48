//! Error type for the kexec sequence
//!
//! The taxonomy is flat: every variant is handled where it is detected and
//! ends the process with status 1.

use core::fmt;
use std::path::PathBuf;

use kexec_sys::Errno;

/// Everything that can stop a kexec before the handoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KexecError {
    /// Wrong argument count or unknown option
    Usage { program: String, detail: Option<String> },
    /// Not running on Linux
    UnsupportedPlatform(String),
    /// Linux, but an architecture without a syscall table here
    UnsupportedArch(String),
    /// Effective uid is not 0
    NotRoot { euid: Option<u32>, user: Option<String> },
    /// Path is missing or not a regular file
    MissingFile(PathBuf),
    /// Path exists but can't be opened for reading
    Unreadable { path: PathBuf, reason: String },
    /// The active boot command line could not be read
    CmdlineRead { path: PathBuf, reason: String },
    /// The rewritten command line contains an interior NUL
    InvalidCmdline,
    /// Kernel path would split into several boot parameters
    ImagePathWhitespace(PathBuf),
    /// `kexec_file_load(2)` refused the images
    Load(Errno),
    /// `reboot(2)` came back instead of handing off
    RebootReturned(Errno),
}

impl KexecError {
    /// Process exit status for this error
    pub fn exit_status(&self) -> i32 {
        1
    }
}

impl fmt::Display for KexecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KexecError::Usage { program, detail } => {
                if let Some(detail) = detail {
                    writeln!(f, "{}: {}", program, detail)?;
                }
                write!(f, "Usage: {} <kernel image> <initrd file>", program)
            }
            KexecError::UnsupportedPlatform(os) => {
                write!(f, "{} doesn't have the same syscalls as Linux", os)
            }
            KexecError::UnsupportedArch(arch) => {
                write!(f, "kexec is not supported on {} yet", arch)
            }
            KexecError::NotRoot { euid, user } => {
                write!(f, "Only root has the permission to do it, not you (")?;
                match euid {
                    Some(euid) => write!(f, "{}", euid)?,
                    None => write!(f, "unknown uid")?,
                }
                if let Some(user) = user {
                    write!(f, ": {}", user)?;
                }
                write!(f, ")")
            }
            KexecError::MissingFile(path) => write!(f, "'{}' file doesn't exist", path.display()),
            KexecError::Unreadable { path, reason } => {
                write!(f, "'{}' can't be read: {}", path.display(), reason)
            }
            KexecError::CmdlineRead { path, reason } => {
                write!(f, "can't read boot command line from {}: {}", path.display(), reason)
            }
            KexecError::InvalidCmdline => write!(f, "boot command line contains a NUL byte"),
            KexecError::ImagePathWhitespace(path) => {
                write!(f, "'{}' can't be used as BOOT_IMAGE: the path contains whitespace", path.display())
            }
            KexecError::Load(_) => write!(f, "Error in kexec_file_load(2) has occurred"),
            KexecError::RebootReturned(errno) => {
                write!(f, "reboot(2) returned without handing off to the new kernel: {}", errno)
            }
        }
    }
}

impl std::error::Error for KexecError {}

/// Result type for the kexec sequence
pub type Result<T> = core::result::Result<T, KexecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failures_share_one_message() {
        let busy = KexecError::Load(Errno::EBUSY).to_string();
        let nomem = KexecError::Load(Errno::ENOMEM).to_string();
        assert_eq!(busy, nomem);
        assert_eq!(busy, "Error in kexec_file_load(2) has occurred");
    }

    #[test]
    fn test_not_root_names_user() {
        let err = KexecError::NotRoot { euid: Some(1000), user: Some("alice".into()) };
        assert_eq!(err.to_string(), "Only root has the permission to do it, not you (1000: alice)");
    }

    #[test]
    fn test_usage_with_detail() {
        let err = KexecError::Usage { program: "kexec".into(), detail: Some("unknown option '-x'".into()) };
        assert_eq!(
            err.to_string(),
            "kexec: unknown option '-x'\nUsage: kexec <kernel image> <initrd file>"
        );
    }

    #[test]
    fn test_every_error_exits_one() {
        assert_eq!(KexecError::InvalidCmdline.exit_status(), 1);
        assert_eq!(KexecError::ImagePathWhitespace("/boot/a b".into()).exit_status(), 1);
        assert_eq!(KexecError::RebootReturned(Errno::EINVAL).exit_status(), 1);
    }
}
