use crate::{
    ModuleHandle, OsImpl, Outcome, Platform, ProcessDescriptor, Result, Timestamp,
    buf::FixedBuf,
    error::{overflow_error, unresolved_error},
    identity,
    os::NativePath,
    path::derive_log_path,
};
use core::fmt::{Display, Write};

/// Longest record, line ending included. Longer records are not written.
pub const MAX_RECORD_LEN: usize = 1024;

/// Tag of the record [`Logger::append_process_record`] writes.
pub const PROCESS_INFO_TAG: &str = "ProcessInfo";

/// A record being assembled.
pub type Record = FixedBuf<u8, MAX_RECORD_LEN>;

/// Formats `[timestamp] [tag]: message\r\n` into `out`, replacing whatever
/// it held.
pub fn format_record<const N: usize>(
    out: &mut FixedBuf<u8, N>,
    at: &Timestamp,
    tag: &str,
    message: impl Display,
) -> Result<()> {
    out.clear();
    write!(out, "[{at}] [{tag}]: {message}\r\n").map_err(|_| overflow_error(N))
}

/// Appends lifecycle records to the log file next to a module.
///
/// The logger holds no file handle. Each call resolves the destination from
/// the module path, opens the file for append, writes one record and closes
/// it again, so a call never blocks on another and no handle outlives it.
/// Failures of any step are reported only through the returned [`Outcome`].
pub struct Logger<P: Platform = OsImpl> {
    module: Option<ModuleHandle>,
    platform: P,
}

impl Logger<OsImpl> {
    /// A logger for the module currently held by the identity holder.
    ///
    /// Before process attach and after process detach there is no module,
    /// and every call is a no-op.
    #[inline]
    pub fn current() -> Self {
        Self::new(identity::get(), OsImpl)
    }
}

impl<P: Platform> Logger<P> {
    #[inline]
    pub fn new(module: Option<ModuleHandle>, platform: P) -> Self {
        Self { module, platform }
    }

    #[inline]
    pub fn module(&self) -> Option<ModuleHandle> {
        self.module
    }

    /// Appends `[timestamp] [tag]: message`.
    pub fn append_record(&self, tag: &str, message: &str) -> Outcome {
        self.append_display(tag, message)
    }

    /// Like [`append_record`](Self::append_record), formatting the message
    /// straight into the record buffer.
    pub fn append_display(&self, tag: &str, message: impl Display) -> Outcome {
        Outcome::from_result(self.write_record(tag, message))
    }

    /// Appends a `ProcessInfo` record naming the host process.
    pub fn append_process_record(&self) -> Outcome {
        Outcome::from_result(
            ProcessDescriptor::capture(&self.platform)
                .and_then(|process| self.write_record(PROCESS_INFO_TAG, process)),
        )
    }

    /// Writes the log destination of the module into `out`.
    pub fn destination(&self, out: &mut NativePath<P::Unit>) -> Result<()> {
        let module = self.module.ok_or_else(unresolved_error)?;
        let mut module_path = NativePath::new();
        self.platform.module_path(module, &mut module_path)?;
        derive_log_path(module_path.as_slice(), out).map_err(|_| unresolved_error())
    }

    fn write_record(&self, tag: &str, message: impl Display) -> Result<()> {
        let mut destination = NativePath::new();
        self.destination(&mut destination)?;

        let now = self.platform.local_time()?;
        let mut record = Record::new();
        format_record(&mut record, &now, tag, message)?;

        let path = destination
            .as_nul_terminated()
            .map_err(|_| unresolved_error())?;
        self.platform.append(path, record.as_bytes())
    }
}
