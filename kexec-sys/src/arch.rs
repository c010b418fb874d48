//! Low-level syscall trampolines
//!
//! One set per supported architecture. Each places the number and arguments
//! in the registers the Linux ABI expects and returns the raw result, which
//! is negative `errno` on failure.

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
mod imp {
    use core::arch::asm;

    pub const SUPPORTED: bool = true;

    #[inline(always)]
    pub unsafe fn syscall0(num: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "syscall",
                inlateout("rax") num as isize => ret,
                lateout("rcx") _,
                lateout("r11") _,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall1(num: usize, arg0: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "syscall",
                inlateout("rax") num as isize => ret,
                in("rdi") arg0,
                lateout("rcx") _,
                lateout("r11") _,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall3(num: usize, arg0: usize, arg1: usize, arg2: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "syscall",
                inlateout("rax") num as isize => ret,
                in("rdi") arg0,
                in("rsi") arg1,
                in("rdx") arg2,
                lateout("rcx") _,
                lateout("r11") _,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall4(num: usize, a0: usize, a1: usize, a2: usize, a3: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "syscall",
                inlateout("rax") num as isize => ret,
                in("rdi") a0,
                in("rsi") a1,
                in("rdx") a2,
                in("r10") a3,
                lateout("rcx") _,
                lateout("r11") _,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall5(num: usize, a0: usize, a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "syscall",
                inlateout("rax") num as isize => ret,
                in("rdi") a0,
                in("rsi") a1,
                in("rdx") a2,
                in("r10") a3,
                in("r8") a4,
                lateout("rcx") _,
                lateout("r11") _,
                options(nostack),
            );
        }
        ret
    }
}

#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
mod imp {
    use core::arch::asm;

    pub const SUPPORTED: bool = true;

    #[inline(always)]
    pub unsafe fn syscall0(num: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "svc #0",
                lateout("x0") ret,
                in("x8") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall1(num: usize, arg0: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "svc #0",
                inlateout("x0") arg0 as isize => ret,
                in("x8") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall3(num: usize, arg0: usize, arg1: usize, arg2: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "svc #0",
                inlateout("x0") arg0 as isize => ret,
                in("x1") arg1,
                in("x2") arg2,
                in("x8") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall4(num: usize, a0: usize, a1: usize, a2: usize, a3: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "svc #0",
                inlateout("x0") a0 as isize => ret,
                in("x1") a1,
                in("x2") a2,
                in("x3") a3,
                in("x8") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall5(num: usize, a0: usize, a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "svc #0",
                inlateout("x0") a0 as isize => ret,
                in("x1") a1,
                in("x2") a2,
                in("x3") a3,
                in("x4") a4,
                in("x8") num,
                options(nostack),
            );
        }
        ret
    }
}

#[cfg(all(target_os = "linux", target_arch = "riscv64"))]
mod imp {
    use core::arch::asm;

    pub const SUPPORTED: bool = true;

    #[inline(always)]
    pub unsafe fn syscall0(num: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "ecall",
                lateout("a0") ret,
                in("a7") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall1(num: usize, arg0: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "ecall",
                inlateout("a0") arg0 as isize => ret,
                in("a7") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall3(num: usize, arg0: usize, arg1: usize, arg2: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "ecall",
                inlateout("a0") arg0 as isize => ret,
                in("a1") arg1,
                in("a2") arg2,
                in("a7") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall4(num: usize, a0: usize, a1: usize, a2: usize, a3: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "ecall",
                inlateout("a0") a0 as isize => ret,
                in("a1") a1,
                in("a2") a2,
                in("a3") a3,
                in("a7") num,
                options(nostack),
            );
        }
        ret
    }

    #[inline(always)]
    pub unsafe fn syscall5(num: usize, a0: usize, a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
        let ret: isize;
        unsafe {
            asm!(
                "ecall",
                inlateout("a0") a0 as isize => ret,
                in("a1") a1,
                in("a2") a2,
                in("a3") a3,
                in("a4") a4,
                in("a7") num,
                options(nostack),
            );
        }
        ret
    }
}

// Everything else gets stubs so dependents still build and can reject the
// platform at runtime.
#[cfg(not(all(
    target_os = "linux",
    any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "riscv64")
)))]
mod imp {
    use crate::errno::Errno;

    pub const SUPPORTED: bool = false;

    const UNSUPPORTED: isize = -(Errno::ENOSYS.raw() as isize);

    pub unsafe fn syscall0(_num: usize) -> isize {
        UNSUPPORTED
    }

    pub unsafe fn syscall1(_num: usize, _arg0: usize) -> isize {
        UNSUPPORTED
    }

    pub unsafe fn syscall3(_num: usize, _arg0: usize, _arg1: usize, _arg2: usize) -> isize {
        UNSUPPORTED
    }

    pub unsafe fn syscall4(_num: usize, _a0: usize, _a1: usize, _a2: usize, _a3: usize) -> isize {
        UNSUPPORTED
    }

    pub unsafe fn syscall5(_num: usize, _a0: usize, _a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
        UNSUPPORTED
    }
}

pub use imp::*;
