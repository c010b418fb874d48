//! Sequencer
//!
//! Drives one kexec from start to handoff:
//!
//! ```text
//! Start → Validated → Rewritten → Loaded → Announced → Flushed → Rebooting
//! ```
//!
//! Stages only move forward and no step is retried. Any failure before the
//! flush returns an error for the caller to report; once the kernel is
//! loaded there is no abort path, only the fixed delay.

use core::convert::Infallible;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::cmdline::{BootCommandLine, RewrittenCmdline};
use crate::config::KexecConfig;
use crate::console::{self, STDOUT};
use crate::error::{KexecError, Result};
use crate::gateway::SyscallGateway;
use crate::image::{ImageHandle, ImageKind};
use crate::platform::Environment;
use crate::validator;

/// Progress through the kexec sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    Validated,
    Rewritten,
    Loaded,
    Announced,
    Flushed,
    Rebooting,
}

/// Timed, non-cancellable suspension
#[cfg_attr(test, mockall::automock)]
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Sleeps the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

pub struct Sequencer<'a, G: SyscallGateway + ?Sized, P: Pause + ?Sized> {
    gateway: &'a G,
    pause: &'a P,
    config: KexecConfig,
    stage: Stage,
}

impl<'a, G: SyscallGateway + ?Sized, P: Pause + ?Sized> Sequencer<'a, G, P> {
    pub fn new(gateway: &'a G, pause: &'a P, config: KexecConfig) -> Self {
        Self {
            gateway,
            pause,
            config,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the whole sequence.
    ///
    /// Only returns on failure: a successful reboot never comes back.
    pub fn run(&mut self, env: &Environment, kernel: &Path, initrd: &Path) -> Result<Infallible> {
        let images = validator::validate(env, kernel, initrd)?;
        self.advance(Stage::Validated);

        let cmdline = self.rewrite_cmdline(&images.kernel)?;
        self.advance(Stage::Rewritten);

        let kernel = ImageHandle::open(ImageKind::Kernel, &images.kernel)?;
        let initrd = ImageHandle::open(ImageKind::Initrd, &images.initrd)?;
        self.load(&kernel, &initrd, &cmdline)?;
        self.advance(Stage::Loaded);

        console::println(self.gateway, STDOUT, format_args!("{}", self.config.countdown_notice()));
        self.pause.pause(self.config.reboot_delay);
        self.advance(Stage::Announced);

        // Advisory; nothing it reports can stop the reboot.
        self.gateway.sync();
        self.advance(Stage::Flushed);

        self.advance(Stage::Rebooting);
        match self.gateway.reboot_kexec() {
            Ok(never) => match never {},
            Err(errno) => {
                log::error!("reboot into the loaded kernel failed: {}", errno);
                Err(KexecError::RebootReturned(errno))
            }
        }
    }

    fn rewrite_cmdline(&self, kernel: &Path) -> Result<RewrittenCmdline> {
        let current = BootCommandLine::read_from(&self.config.cmdline_path)?;
        if !current.has_boot_image() {
            log::warn!(
                "{} has no leading BOOT_IMAGE=, passing it through unchanged",
                self.config.cmdline_path.display()
            );
        }
        let rewritten = current.rewrite(kernel)?;
        log::info!("new command line: {}", String::from_utf8_lossy(rewritten.as_bytes()));
        Ok(rewritten)
    }

    fn load(&self, kernel: &ImageHandle, initrd: &ImageHandle, cmdline: &RewrittenCmdline) -> Result<()> {
        log::info!(
            "loading {} with {} ({} byte command line)",
            kernel.path().display(),
            initrd.path().display(),
            cmdline.len_with_nul()
        );
        self.gateway
            .kexec_file_load(kernel.fd(), initrd.fd(), cmdline.as_c_str(), self.config.load_flags)
            .into_result()
            .map(|_| ())
            .map_err(|errno| {
                log::debug!("kexec_file_load failed with {}", errno);
                KexecError::Load(errno)
            })
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage, "stage {:?} after {:?}", next, self.stage);
        log::debug!("{:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockSyscallGateway;
    use crate::testing::ScratchDir;
    use kexec_sys::{Errno, SyscallResult};
    use mockall::Sequence;
    use std::path::PathBuf;

    const NOTICE: &[u8] = b"System will reboot in 5 seconds..\n";

    struct Fixture {
        dir: ScratchDir,
        kernel: PathBuf,
        initrd: PathBuf,
        config: KexecConfig,
    }

    impl Fixture {
        fn new(name: &str, cmdline: &str) -> Self {
            let dir = ScratchDir::new(name);
            let kernel = dir.file("vmlinuz", b"kernel");
            let initrd = dir.file("initrd.img", b"initrd");
            let mut config = KexecConfig::new();
            config.cmdline_path = dir.file("cmdline", cmdline.as_bytes());
            Self { dir, kernel, initrd, config }
        }
    }

    fn root() -> Environment {
        Environment::new("linux", "x86_64", Some(0))
    }

    #[test]
    fn test_successful_load_flushes_then_reboots() {
        let fx = Fixture::new("seq-success", "BOOT_IMAGE=/old/vmlinuz root=/dev/sda1 quiet\n");
        let expected = format!("BOOT_IMAGE={} root=/dev/sda1 quiet", fx.kernel.display());

        let mut gateway = MockSyscallGateway::new();
        let mut pause = MockPause::new();
        let mut seq = Sequence::new();

        gateway
            .expect_kexec_file_load()
            .withf(move |kernel_fd, initrd_fd, cmdline, flags| {
                *kernel_fd >= 0
                    && *initrd_fd >= 0
                    && kernel_fd != initrd_fd
                    && cmdline.to_bytes() == expected.as_bytes()
                    && cmdline.to_bytes_with_nul().len() == expected.len() + 1
                    && flags.is_empty()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| SyscallResult::Success(0));
        gateway
            .expect_write()
            .withf(|fd, buf| *fd == STDOUT && buf == NOTICE)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, buf| SyscallResult::Success(buf.len()));
        pause
            .expect_pause()
            .withf(|duration| *duration == Duration::from_secs(5))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        gateway.expect_sync().times(1).in_sequence(&mut seq).return_const(());
        gateway
            .expect_reboot_kexec()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(Errno::EOK));

        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&root(), &fx.kernel, &fx.initrd).unwrap_err();

        // The mock reboot came back, which the sequencer must treat as fatal.
        assert_eq!(err, KexecError::RebootReturned(Errno::EOK));
        assert_eq!(err.exit_status(), 1);
        assert_eq!(sequencer.stage(), Stage::Rebooting);
    }

    #[test]
    fn test_load_failure_stops_before_flush() {
        let fx = Fixture::new("seq-load-failure", "BOOT_IMAGE=/old ro\n");

        let mut gateway = MockSyscallGateway::new();
        let mut pause = MockPause::new();
        gateway
            .expect_kexec_file_load()
            .times(1)
            .returning(|_, _, _, _| SyscallResult::Error(Errno::EBUSY));
        gateway.expect_write().times(0);
        gateway.expect_sync().times(0);
        gateway.expect_reboot_kexec().times(0);
        pause.expect_pause().times(0);

        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&root(), &fx.kernel, &fx.initrd).unwrap_err();

        assert_eq!(err, KexecError::Load(Errno::EBUSY));
        assert_eq!(err.exit_status(), 1);
        assert_eq!(sequencer.stage(), Stage::Rewritten);
    }

    #[test]
    fn test_non_root_makes_no_calls() {
        let fx = Fixture::new("seq-non-root", "BOOT_IMAGE=/old ro\n");

        let mut gateway = MockSyscallGateway::new();
        let mut pause = MockPause::new();
        gateway.expect_kexec_file_load().times(0);
        gateway.expect_write().times(0);
        gateway.expect_sync().times(0);
        gateway.expect_reboot_kexec().times(0);
        pause.expect_pause().times(0);

        let env = Environment::new("linux", "x86_64", Some(1000));
        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&env, &fx.kernel, &fx.initrd).unwrap_err();

        assert!(matches!(err, KexecError::NotRoot { euid: Some(1000), .. }));
        assert_eq!(sequencer.stage(), Stage::Start);
    }

    #[test]
    fn test_missing_kernel_never_loads() {
        let fx = Fixture::new("seq-missing-kernel", "BOOT_IMAGE=/old ro\n");
        let kernel = fx.dir.path().join("vmlinuz-missing");

        let mut gateway = MockSyscallGateway::new();
        let pause = MockPause::new();
        gateway.expect_kexec_file_load().times(0);
        gateway.expect_reboot_kexec().times(0);

        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&root(), &kernel, &fx.initrd).unwrap_err();

        assert_eq!(err, KexecError::MissingFile(kernel));
    }

    #[test]
    fn test_unreadable_cmdline_source() {
        let mut fx = Fixture::new("seq-no-cmdline", "");
        fx.config.cmdline_path = fx.dir.path().join("absent");

        let mut gateway = MockSyscallGateway::new();
        let pause = MockPause::new();
        gateway.expect_kexec_file_load().times(0);

        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&root(), &fx.kernel, &fx.initrd).unwrap_err();

        assert!(matches!(err, KexecError::CmdlineRead { .. }));
        assert_eq!(sequencer.stage(), Stage::Validated);
    }

    #[test]
    fn test_kernel_path_with_space_never_loads() {
        let fx = Fixture::new("seq-space-kernel", "BOOT_IMAGE=/old root=/dev/sda1 quiet\n");
        let kernel = fx.dir.file("my kernel", b"kernel");

        let mut gateway = MockSyscallGateway::new();
        let mut pause = MockPause::new();
        gateway.expect_kexec_file_load().times(0);
        gateway.expect_write().times(0);
        gateway.expect_sync().times(0);
        gateway.expect_reboot_kexec().times(0);
        pause.expect_pause().times(0);

        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&root(), &kernel, &fx.initrd).unwrap_err();

        assert_eq!(err, KexecError::ImagePathWhitespace(kernel));
        assert_eq!(err.exit_status(), 1);
        assert_eq!(sequencer.stage(), Stage::Validated);
    }

    #[test]
    fn test_cmdline_without_boot_image_is_loaded_verbatim() {
        let fx = Fixture::new("seq-passthrough", "root=/dev/sda1 ro\n");

        let mut gateway = MockSyscallGateway::new();
        let mut pause = MockPause::new();
        gateway
            .expect_kexec_file_load()
            .withf(|_, _, cmdline, _| cmdline.to_bytes() == b"root=/dev/sda1 ro")
            .times(1)
            .returning(|_, _, _, _| SyscallResult::Success(0));
        gateway
            .expect_write()
            .returning(|_, buf| SyscallResult::Success(buf.len()));
        pause.expect_pause().times(1).return_const(());
        gateway.expect_sync().times(1).return_const(());
        gateway
            .expect_reboot_kexec()
            .times(1)
            .returning(|| Err(Errno::EINVAL));

        let mut sequencer = Sequencer::new(&gateway, &pause, fx.config.clone());
        let err = sequencer.run(&root(), &fx.kernel, &fx.initrd).unwrap_err();

        assert_eq!(err, KexecError::RebootReturned(Errno::EINVAL));
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Start < Stage::Validated);
        assert!(Stage::Loaded < Stage::Announced);
        assert!(Stage::Flushed < Stage::Rebooting);
    }
}
