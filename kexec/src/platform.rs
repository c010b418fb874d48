//! Facts about the running process the validator checks

use std::fs;

/// Account database used to put a name to a uid in diagnostics
pub const PASSWD: &str = "/etc/passwd";

/// Platform and privilege snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `std::env::consts::OS` of the build
    pub os: String,
    /// `std::env::consts::ARCH` of the build
    pub arch: String,
    /// Effective uid, when the platform can report one
    pub euid: Option<u32>,
}

impl Environment {
    pub fn new(os: impl Into<String>, arch: impl Into<String>, euid: Option<u32>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            euid,
        }
    }

    /// Snapshot of the calling process
    pub fn current() -> Self {
        let euid = if kexec_sys::PLATFORM_SUPPORTED {
            kexec_sys::geteuid().ok()
        } else {
            None
        };
        Self::new(std::env::consts::OS, std::env::consts::ARCH, euid)
    }

    pub fn is_superuser(&self) -> bool {
        self.euid == Some(0)
    }
}

/// Login name for `uid`, if the account database has one
pub fn user_name(uid: u32) -> Option<String> {
    let passwd = fs::read_to_string(PASSWD).ok()?;
    lookup_user(&passwd, uid)
}

/// Find `uid` in `passwd(5)` formatted text
pub fn lookup_user(passwd: &str, uid: u32) -> Option<String> {
    passwd
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let mut fields = line.split(':');
            let name = fields.next()?;
            let entry_uid = fields.nth(1)?.parse::<u32>().ok()?;
            (entry_uid == uid && !name.is_empty()).then(|| name.to_string())
        })
}
