//! Open handles on the kernel and initrd images

use core::fmt;
use std::fs::File;
use std::os::fd::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use crate::error::{KexecError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Kernel,
    Initrd,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Kernel => write!(f, "kernel"),
            ImageKind::Initrd => write!(f, "initrd"),
        }
    }
}

/// Read-only image file, held open until the process ends
#[derive(Debug)]
pub struct ImageHandle {
    path: PathBuf,
    file: File,
}

impl ImageHandle {
    pub fn open(kind: ImageKind, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| KexecError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("opened {} image {} as fd {}", kind, path.display(), file.as_raw_fd());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScratchDir;

    #[test]
    fn test_open_image() {
        let dir = ScratchDir::new("image-open");
        let path = dir.file("vmlinuz", b"kernel");
        let handle = ImageHandle::open(ImageKind::Kernel, &path).unwrap();
        assert_eq!(handle.path(), path.as_path());
        assert!(handle.fd() >= 0);
    }

    #[test]
    fn test_open_missing_image() {
        let dir = ScratchDir::new("image-missing");
        let path = dir.path().join("initrd.img");
        assert!(matches!(
            ImageHandle::open(ImageKind::Initrd, &path),
            Err(KexecError::Unreadable { .. })
        ));
    }
}
