//! Precondition checks
//!
//! Run before anything irreversible. Order matters and the first failure
//! wins: platform, then privilege, then the two input files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{KexecError, Result};
use crate::platform::{self, Environment};

pub const SUPPORTED_OS: &str = "linux";
pub const SUPPORTED_ARCHES: &[&str] = &["x86_64", "aarch64", "riscv64"];

/// Kernel and initrd paths that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImages {
    pub kernel: PathBuf,
    pub initrd: PathBuf,
}

pub fn validate(env: &Environment, kernel: &Path, initrd: &Path) -> Result<ValidatedImages> {
    check_platform(env)?;
    check_privilege(env)?;
    check_image(kernel)?;
    check_image(initrd)?;
    log::debug!("preconditions hold for {} and {}", kernel.display(), initrd.display());
    Ok(ValidatedImages {
        kernel: kernel.to_path_buf(),
        initrd: initrd.to_path_buf(),
    })
}

pub fn check_platform(env: &Environment) -> Result<()> {
    if env.os != SUPPORTED_OS {
        return Err(KexecError::UnsupportedPlatform(capitalize(&env.os)));
    }
    if !SUPPORTED_ARCHES.contains(&env.arch.as_str()) {
        return Err(KexecError::UnsupportedArch(env.arch.clone()));
    }
    Ok(())
}

pub fn check_privilege(env: &Environment) -> Result<()> {
    if env.is_superuser() {
        return Ok(());
    }
    Err(KexecError::NotRoot {
        euid: env.euid,
        user: env.euid.and_then(platform::user_name),
    })
}

/// The path must be an existing regular file we can open for reading
pub fn check_image(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(KexecError::MissingFile(path.to_path_buf())),
    }
    File::open(path).map_err(|e| KexecError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
