//! Raw console output through the gateway's write call. Nothing here is
//! buffered, so a message is on the terminal before the next step starts.

use core::fmt::{self, Write};
use std::os::fd::RawFd;

use kexec_sys::{Errno, SyscallResult};

use crate::gateway::SyscallGateway;

pub use kexec_sys::{STDERR, STDOUT};

pub struct Console<'a, G: SyscallGateway + ?Sized> {
    gateway: &'a G,
    fd: RawFd,
}

impl<'a, G: SyscallGateway + ?Sized> Console<'a, G> {
    pub fn new(gateway: &'a G, fd: RawFd) -> Self {
        Self { gateway, fd }
    }

    /// Write the whole buffer, retrying short writes and EINTR
    pub fn write_all(&mut self, mut buf: &[u8]) -> Result<(), Errno> {
        while !buf.is_empty() {
            match self.gateway.write(self.fd, buf) {
                SyscallResult::Success(0) => return Err(Errno::EIO),
                SyscallResult::Success(n) => buf = &buf[n.min(buf.len())..],
                SyscallResult::Error(Errno::EINTR) => continue,
                SyscallResult::Error(errno) => return Err(errno),
            }
        }
        Ok(())
    }
}

impl<G: SyscallGateway + ?Sized> Write for Console<'_, G> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Format a line and emit it with a single write where possible
pub fn println<G: SyscallGateway + ?Sized>(gateway: &G, fd: RawFd, args: fmt::Arguments) {
    let line = format!("{}\n", args);
    let _ = Console::new(gateway, fd).write_all(line.as_bytes());
}
