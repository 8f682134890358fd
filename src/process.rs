use crate::{
    Platform, Result,
    os::NativePath,
    path::{CodeUnit, base_name},
};
use core::fmt::{self, Display};

/// Identifying information about the host process, captured when a process
/// record is built and never cached.
pub struct ProcessDescriptor<T: CodeUnit> {
    pid: u32,
    path: NativePath<T>,
}

impl<T: CodeUnit> ProcessDescriptor<T> {
    pub fn capture<P: Platform<Unit = T>>(platform: &P) -> Result<Self> {
        let mut path = NativePath::new();
        platform.executable_path(&mut path)?;
        Ok(Self {
            pid: platform.process_id(),
            path,
        })
    }

    #[inline]
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Full path of the host executable.
    #[inline]
    pub fn path(&self) -> &[T] {
        self.path.as_slice()
    }

    /// File name of the host executable.
    #[inline]
    pub fn name(&self) -> &[T] {
        base_name(self.path())
    }
}

impl<T: CodeUnit> Display for ProcessDescriptor<T> {
    /// Renders `Process=<name> PID=<pid> Path=<path>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Process=")?;
        T::write_lossy(self.name(), f)?;
        write!(f, " PID={} Path=", self.pid)?;
        T::write_lossy(self.path(), f)
    }
}
