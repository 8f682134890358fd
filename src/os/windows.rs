use crate::{
    ModuleHandle, Result, Timestamp,
    error::{open_error, short_write_error, unresolved_error, write_error},
    os::{NativePath, Platform},
};
use core::{
    mem::MaybeUninit,
    ptr::{null, null_mut},
};
use windows_sys::Win32::{
    Foundation::{CloseHandle, GetLastError, HANDLE, INVALID_HANDLE_VALUE, MAX_PATH},
    Storage::FileSystem::{
        CreateFileW, FILE_APPEND_DATA, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, FILE_SHARE_WRITE,
        OPEN_ALWAYS, WriteFile,
    },
    System::{
        LibraryLoader::GetModuleFileNameW, SystemInformation::GetLocalTime,
        Threading::GetCurrentProcessId,
    },
};

/// `MAX_PATH`, the buffer size `GetModuleFileNameW` callers traditionally use.
pub const MAX_PATH_UNITS: usize = MAX_PATH as usize;

/// The Win32 implementation of [`Platform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsImpl;

/// Closes the handle when the append is over, whatever the outcome.
struct FileGuard(HANDLE);

impl Drop for FileGuard {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.0) };
    }
}

#[inline]
fn last_error() -> i32 {
    unsafe { GetLastError() as i32 }
}

/// `GetModuleFileNameW` returns the buffer size when it truncates, which
/// `fill_with` reports as an overflow; both count as unresolved.
fn module_file_name(module: *mut core::ffi::c_void, out: &mut NativePath<u16>) -> Result<()> {
    out.fill_with(|buf| {
        let len = unsafe { GetModuleFileNameW(module, buf.as_mut_ptr(), buf.len() as u32) };
        if len == 0 {
            return Err(unresolved_error());
        }
        Ok(len as usize)
    })
    .map_err(|_| unresolved_error())
}

impl Platform for OsImpl {
    type Unit = u16;

    fn module_path(&self, module: ModuleHandle, out: &mut NativePath<u16>) -> Result<()> {
        module_file_name(module.as_ptr(), out)
    }

    fn executable_path(&self, out: &mut NativePath<u16>) -> Result<()> {
        // A null module names the process executable.
        module_file_name(null_mut(), out)
    }

    fn process_id(&self) -> u32 {
        unsafe { GetCurrentProcessId() }
    }

    fn local_time(&self) -> Result<Timestamp> {
        let mut st = MaybeUninit::uninit();
        let st = unsafe {
            GetLocalTime(st.as_mut_ptr());
            st.assume_init()
        };
        Ok(Timestamp {
            year: st.wYear,
            month: st.wMonth as u8,
            day: st.wDay as u8,
            hour: st.wHour as u8,
            minute: st.wMinute as u8,
            second: st.wSecond as u8,
            millisecond: st.wMilliseconds,
        })
    }

    fn append(&self, path: &[u16], bytes: &[u8]) -> Result<()> {
        debug_assert_eq!(path.last(), Some(&0), "path must be NUL terminated");
        // FILE_APPEND_DATA without FILE_WRITE_DATA makes every write land at
        // the current end of file, even with other writers sharing it.
        let handle = unsafe {
            CreateFileW(
                path.as_ptr(),
                FILE_APPEND_DATA,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                null(),
                OPEN_ALWAYS,
                FILE_ATTRIBUTE_NORMAL,
                null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(open_error(last_error()));
        }
        let file = FileGuard(handle);

        let mut written = 0u32;
        let ok = unsafe {
            WriteFile(
                file.0,
                bytes.as_ptr(),
                bytes.len() as u32,
                &mut written,
                null_mut(),
            )
        };
        if ok == 0 {
            return Err(write_error(last_error()));
        }
        if written as usize != bytes.len() {
            return Err(short_write_error(written as usize, bytes.len()));
        }
        Ok(())
    }
}
