//! Logging support for kexec-sys
//!
//! With the `log` feature these forward to the log crate. Without it they
//! compile to nothing but still mark their arguments as used.

macro_rules! sys_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
        #[cfg(not(feature = "log"))]
        { let _ = ($($arg)*); }
    }
}

macro_rules! sys_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
        #[cfg(not(feature = "log"))]
        { let _ = ($($arg)*); }
    }
}
