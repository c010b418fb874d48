//! Boot command line rewriting
//!
//! The running kernel publishes its parameters as one line of text that
//! starts with `BOOT_IMAGE=<path>`. The new kernel gets the same line with
//! only that path swapped out.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use lazy_static::lazy_static;
use regex::bytes::{NoExpand, Regex};

use crate::error::{KexecError, Result};

/// Key of the parameter that names the booted image
pub const BOOT_IMAGE_KEY: &str = "BOOT_IMAGE=";

lazy_static! {
    // Anchored at the start; the path runs to the first whitespace byte.
    // Unicode is off so non-UTF-8 path bytes are matched as-is.
    static ref BOOT_IMAGE: Regex = Regex::new(r"(?-u)\ABOOT_IMAGE=\S*").expect("valid BOOT_IMAGE pattern");
}

/// Boot parameters of the running kernel, read once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootCommandLine {
    bytes: Vec<u8>,
}

impl BootCommandLine {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Read the published command line in full.
    ///
    /// The kernel terminates it with a newline that is not a parameter;
    /// one trailing `\n` is dropped.
    pub fn read_from(path: &Path) -> Result<Self> {
        let mut bytes = fs::read(path).map_err(|e| KexecError::CmdlineRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        Ok(Self::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn has_boot_image(&self) -> bool {
        BOOT_IMAGE.is_match(&self.bytes)
    }

    /// Point `BOOT_IMAGE=` at `image`, leaving every other byte alone.
    ///
    /// Without a leading `BOOT_IMAGE=` the line passes through unchanged.
    /// The kernel splits parameters on whitespace and has no quoting for
    /// `BOOT_IMAGE=`, so an image path containing any is refused.
    pub fn rewrite(&self, image: &Path) -> Result<RewrittenCmdline> {
        let image_bytes = image.as_os_str().as_bytes();
        if self.has_boot_image() && image_bytes.iter().copied().any(is_param_separator) {
            return Err(KexecError::ImagePathWhitespace(image.to_path_buf()));
        }
        let bytes = rewrite_boot_image(&self.bytes, image_bytes);
        let cmdline = CString::new(bytes.into_owned()).map_err(|_| KexecError::InvalidCmdline)?;
        Ok(RewrittenCmdline { cmdline })
    }
}

/// Substitute the first, leading `BOOT_IMAGE=` path with `image`
pub fn rewrite_boot_image<'a>(cmdline: &'a [u8], image: &[u8]) -> Cow<'a, [u8]> {
    let mut replacement = Vec::with_capacity(BOOT_IMAGE_KEY.len() + image.len());
    replacement.extend_from_slice(BOOT_IMAGE_KEY.as_bytes());
    replacement.extend_from_slice(image);
    BOOT_IMAGE.replace(cmdline, NoExpand(&replacement))
}

/// Bytes that end a parameter, the same set `\s` matches with Unicode off
pub fn is_param_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Command line for the new kernel, NUL-terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenCmdline {
    cmdline: CString,
}

impl RewrittenCmdline {
    pub fn as_c_str(&self) -> &CStr {
        &self.cmdline
    }

    /// Text without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        self.cmdline.as_bytes()
    }

    /// Length handed to the kernel, terminator included
    pub fn len_with_nul(&self) -> usize {
        self.cmdline.as_bytes_with_nul().len()
    }
}
