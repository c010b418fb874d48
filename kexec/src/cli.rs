//! Command line arguments
//!
//! `kexec [-v]... <kernel image> <initrd file>`

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{KexecError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the invocation asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Invocation),
    Help { program: String },
    Version,
}

/// A kexec request with both images named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub kernel: PathBuf,
    pub initrd: PathBuf,
    pub verbosity: u32,
}

/// Parse `argv`, program name first.
///
/// Touches neither the filesystem nor the kernel; usage errors surface
/// before anything else runs.
pub fn parse<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "kexec".to_string());

    let mut positional = Vec::new();
    let mut verbosity = 0;
    let mut options_done = false;

    for arg in args {
        if options_done {
            positional.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => options_done = true,
            Some("-h") | Some("--help") => return Ok(Command::Help { program }),
            Some("-V") | Some("--version") => return Ok(Command::Version),
            Some("--verbose") => verbosity += 1,
            Some(flag) if is_verbose_cluster(flag) => verbosity += (flag.len() - 1) as u32,
            Some(flag) if flag.starts_with('-') && flag.len() > 1 => {
                return Err(usage(&program, Some(format!("unknown option '{}'", flag))));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() > 2 {
        let extra = positional[2].to_string_lossy().into_owned();
        return Err(usage(&program, Some(format!("unexpected argument '{}'", extra))));
    }
    let mut positional = positional.into_iter();
    match (positional.next(), positional.next()) {
        (Some(kernel), Some(initrd)) => Ok(Command::Run(Invocation {
            program,
            kernel: PathBuf::from(kernel),
            initrd: PathBuf::from(initrd),
            verbosity,
        })),
        _ => Err(usage(&program, None)),
    }
}

/// `-v`, `-vv`, `-vvv`, ...
fn is_verbose_cluster(flag: &str) -> bool {
    flag.len() > 1 && flag.starts_with('-') && flag[1..].bytes().all(|b| b == b'v')
}

fn usage(program: &str, detail: Option<String>) -> KexecError {
    KexecError::Usage {
        program: program.to_string(),
        detail,
    }
}

pub fn help(program: &str) -> String {
    format!(
        "Usage: {} [OPTIONS] <kernel image> <initrd file>\n\
         \n\
         Load a new kernel and initrd, keep the current boot parameters and\n\
         reboot straight into it without going through firmware.\n\
         \n\
         Options:\n\
         \x20 -v, --verbose   More log output on stderr (repeatable)\n\
         \x20 -h, --help      Print this help\n\
         \x20 -V, --version   Print the version",
        program
    )
}
