use crate::{
    ModuleHandle, Result, Timestamp,
    error::{clock_error, open_error, short_write_error, unresolved_error, write_error},
    os::{NativePath, Platform},
};
use core::mem::MaybeUninit;
use libc::{O_APPEND, O_CLOEXEC, O_CREAT, O_WRONLY};

/// `PATH_MAX` of the target, including the terminator.
pub const MAX_PATH_UNITS: usize = libc::PATH_MAX as usize;

/// The unix implementation of [`Platform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsImpl;

struct Fd(i32);

impl Drop for Fd {
    fn drop(&mut self) {
        unsafe { libc::close(self.0) };
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "redox"))] {
        #[inline]
        fn errno() -> i32 {
            unsafe { *libc::__errno_location() }
        }
    } else if #[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))] {
        #[inline]
        fn errno() -> i32 {
            unsafe { *libc::__errno() }
        }
    } else if #[cfg(any(target_vendor = "apple", target_os = "freebsd", target_os = "dragonfly"))] {
        #[inline]
        fn errno() -> i32 {
            unsafe { *libc::__error() }
        }
    } else {
        #[inline]
        fn errno() -> i32 {
            0
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        fn executable_path(out: &mut NativePath<u8>) -> Result<()> {
            out.fill_with(|buf| {
                let len = unsafe {
                    libc::readlink(c"/proc/self/exe".as_ptr(), buf.as_mut_ptr().cast(), buf.len())
                };
                if len <= 0 {
                    return Err(unresolved_error());
                }
                Ok(len as usize)
            })
            .map_err(|_| unresolved_error())
        }
    } else if #[cfg(target_vendor = "apple")] {
        fn executable_path(out: &mut NativePath<u8>) -> Result<()> {
            out.fill_with(|buf| {
                let mut size = buf.len() as u32;
                if unsafe { libc::_NSGetExecutablePath(buf.as_mut_ptr().cast(), &mut size) } != 0 {
                    return Err(unresolved_error());
                }
                Ok(buf.iter().position(|&b| b == 0).unwrap_or(buf.len()))
            })
            .map_err(|_| unresolved_error())
        }
    } else {
        fn executable_path(_out: &mut NativePath<u8>) -> Result<()> {
            Err(unresolved_error())
        }
    }
}

impl Platform for OsImpl {
    type Unit = u8;

    fn module_path(&self, module: ModuleHandle, out: &mut NativePath<u8>) -> Result<()> {
        let mut info = MaybeUninit::<libc::Dl_info>::zeroed();
        if unsafe { libc::dladdr(module.as_ptr().cast_const(), info.as_mut_ptr()) } == 0 {
            return Err(unresolved_error());
        }
        let info = unsafe { info.assume_init() };
        if info.dli_fname.is_null() || unsafe { *info.dli_fname } == 0 {
            return Err(unresolved_error());
        }
        // `dli_fname` is the name the module was loaded under, which may be
        // relative. `out` holds PATH_MAX bytes, as realpath requires.
        out.fill_with(|buf| {
            if unsafe { libc::realpath(info.dli_fname, buf.as_mut_ptr().cast()) }.is_null() {
                return Err(unresolved_error());
            }
            Ok(buf.iter().position(|&b| b == 0).unwrap_or(buf.len()))
        })
        .map_err(|_| unresolved_error())
    }

    fn executable_path(&self, out: &mut NativePath<u8>) -> Result<()> {
        executable_path(out)
    }

    fn process_id(&self) -> u32 {
        unsafe { libc::getpid() as u32 }
    }

    fn local_time(&self) -> Result<Timestamp> {
        let mut now = MaybeUninit::<libc::timespec>::uninit();
        if unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, now.as_mut_ptr()) } != 0 {
            return Err(clock_error(errno()));
        }
        let now = unsafe { now.assume_init() };

        let mut tm = MaybeUninit::<libc::tm>::uninit();
        if unsafe { libc::localtime_r(&now.tv_sec, tm.as_mut_ptr()) }.is_null() {
            return Err(clock_error(errno()));
        }
        let tm = unsafe { tm.assume_init() };
        Ok(Timestamp {
            year: (tm.tm_year + 1900) as u16,
            month: (tm.tm_mon + 1) as u8,
            day: tm.tm_mday as u8,
            hour: tm.tm_hour as u8,
            minute: tm.tm_min as u8,
            second: tm.tm_sec as u8,
            millisecond: (now.tv_nsec / 1_000_000) as u16,
        })
    }

    fn append(&self, path: &[u8], bytes: &[u8]) -> Result<()> {
        debug_assert_eq!(path.last(), Some(&0), "path must be NUL terminated");
        let fd = unsafe {
            libc::open(
                path.as_ptr().cast(),
                O_WRONLY | O_APPEND | O_CREAT | O_CLOEXEC,
                0o644 as libc::c_uint,
            )
        };
        if fd == -1 {
            return Err(open_error(errno()));
        }
        let fd = Fd(fd);

        // O_APPEND positions and writes atomically, so records from
        // concurrent callers never interleave within a line.
        let written = unsafe { libc::write(fd.0, bytes.as_ptr().cast(), bytes.len()) };
        if written < 0 {
            return Err(write_error(errno()));
        }
        if written as usize != bytes.len() {
            return Err(short_write_error(written as usize, bytes.len()));
        }
        Ok(())
    }
}
