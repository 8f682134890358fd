//! The module identity holder.
//!
//! The lifecycle entry point is the only place that receives the module
//! handle, and its signature is fixed by the platform, so the handle is kept
//! in one process-wide slot. The host serializes process attach and detach
//! for a module instance; the slot is atomic only so that thread
//! notifications can read it without a data race.

use core::{ffi::c_void, ptr::NonNull};

cfg_if::cfg_if! {
    if #[cfg(feature = "portable-atomic")] {
        use portable_atomic::{AtomicUsize, Ordering};
    } else {
        use core::sync::atomic::{AtomicUsize, Ordering};
    }
}

const EMPTY: usize = 0;

static MODULE: AtomicUsize = AtomicUsize::new(EMPTY);

/// An opaque handle naming a loaded module instance.
///
/// On Windows this is the `HMODULE` the loader passes to `DllMain`. On unix
/// it is any address inside the module's mapped image, which is enough for
/// `dladdr` to find the file the image came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModuleHandle(NonNull<c_void>);

// The handle is an address used only as a lookup key, never dereferenced.
unsafe impl Send for ModuleHandle {}
unsafe impl Sync for ModuleHandle {}

impl ModuleHandle {
    /// Wraps a raw handle. A null handle is the empty sentinel and yields
    /// `None`.
    #[inline]
    pub fn new(raw: *mut c_void) -> Option<Self> {
        NonNull::new(raw).map(Self)
    }

    /// A handle for the module containing `addr`.
    #[inline]
    pub fn containing<T>(addr: *const T) -> Option<Self> {
        Self::new(addr as *mut c_void)
    }

    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Records the current module instance. Called on process attach.
#[inline]
pub fn set(handle: ModuleHandle) {
    MODULE.store(handle.as_ptr() as usize, Ordering::Release);
}

/// The current module instance, or `None` before process attach and after
/// process detach.
#[inline]
pub fn get() -> Option<ModuleHandle> {
    ModuleHandle::new(MODULE.load(Ordering::Acquire) as *mut c_void)
}

/// Invalidates the stored instance. Called once the process-detach record
/// has been written; any later logging call is a no-op.
#[inline]
pub fn clear() {
    MODULE.store(EMPTY, Ordering::Release);
}
