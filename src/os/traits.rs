use crate::{
    ModuleHandle, Result, Timestamp,
    buf::FixedBuf,
    path::CodeUnit,
};

use super::MAX_PATH_UNITS;

/// A native path in a platform-sized stack buffer.
pub type NativePath<T> = FixedBuf<T, MAX_PATH_UNITS>;

/// The OS services the lifecycle logger depends on.
///
/// [`OsImpl`](super::OsImpl) is the real implementation for the target
/// platform. Every method must be safe to call while the host holds its
/// loader lock: no loading of other modules, no thread creation, no waiting
/// on other threads, and no heap allocation where the platform avoids it.
///
/// # Example
/// ```rust,ignore
/// struct FixedModule(Vec<u8>);
///
/// impl Platform for FixedModule {
///     type Unit = u8;
///
///     fn module_path(&self, _: ModuleHandle, out: &mut NativePath<u8>) -> Result<()> {
///         out.extend_from_slice(&self.0)
///     }
///
///     // Delegate the remaining methods to `OsImpl`...
/// }
/// ```
pub trait Platform {
    /// The code unit of native paths.
    type Unit: CodeUnit;

    /// Writes the absolute path of the file `module` was loaded from.
    ///
    /// A path that does not fit `out` is an error, not a truncation.
    fn module_path(&self, module: ModuleHandle, out: &mut NativePath<Self::Unit>) -> Result<()>;

    /// Writes the absolute path of the host process executable.
    fn executable_path(&self, out: &mut NativePath<Self::Unit>) -> Result<()>;

    /// The identifier of the current process.
    fn process_id(&self) -> u32;

    /// The current local wall-clock time.
    fn local_time(&self) -> Result<Timestamp>;

    /// Appends `bytes` to the file at `path` with a single write, creating
    /// the file if needed. The file is opened and closed within the call.
    ///
    /// `path` is NUL terminated.
    fn append(&self, path: &[Self::Unit], bytes: &[u8]) -> Result<()>;
}

impl<P: Platform + ?Sized> Platform for &P {
    type Unit = P::Unit;

    #[inline]
    fn module_path(&self, module: ModuleHandle, out: &mut NativePath<Self::Unit>) -> Result<()> {
        (**self).module_path(module, out)
    }

    #[inline]
    fn executable_path(&self, out: &mut NativePath<Self::Unit>) -> Result<()> {
        (**self).executable_path(out)
    }

    #[inline]
    fn process_id(&self) -> u32 {
        (**self).process_id()
    }

    #[inline]
    fn local_time(&self) -> Result<Timestamp> {
        (**self).local_time()
    }

    #[inline]
    fn append(&self, path: &[Self::Unit], bytes: &[u8]) -> Result<()> {
        (**self).append(path, bytes)
    }
}
