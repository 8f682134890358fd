use core::fmt::{Debug, Display};

/// Error types used throughout the `modlog` library.
///
/// None of these ever reach a lifecycle caller: every public logging
/// operation folds them into an [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The path of the loaded module could not be obtained.
    ///
    /// This covers an empty identity slot, an OS lookup failure, and a path
    /// that does not fit the platform path buffer.
    IdentityUnresolved,

    /// The log file could not be created or opened for append.
    DestinationUnopenable {
        /// The raw OS error code.
        code: i32,
    },

    /// The OS accepted fewer bytes than the record holds.
    WriteIncomplete {
        /// Bytes reported written.
        written: usize,
        /// Bytes in the record.
        expected: usize,
    },

    /// The write call itself failed.
    Write {
        /// The raw OS error code.
        code: i32,
    },

    /// The local time could not be read.
    Clock {
        /// The raw OS error code.
        code: i32,
    },

    /// A path or record did not fit its fixed-capacity buffer.
    Overflow {
        /// Capacity of the buffer, in code units.
        capacity: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::IdentityUnresolved => write!(f, "module path could not be resolved"),
            Error::DestinationUnopenable { code } => {
                write!(f, "log file could not be opened: os error {code}")
            }
            Error::WriteIncomplete { written, expected } => {
                write!(f, "short write: {written} of {expected} bytes")
            }
            Error::Write { code } => write!(f, "write failed: os error {code}"),
            Error::Clock { code } => write!(f, "local time unavailable: os error {code}"),
            Error::Overflow { capacity } => write!(f, "buffer of {capacity} units overflowed"),
        }
    }
}

impl core::error::Error for Error {}

#[cold]
#[inline(never)]
pub(crate) fn unresolved_error() -> Error {
    Error::IdentityUnresolved
}

#[cold]
#[inline(never)]
pub(crate) fn open_error(code: i32) -> Error {
    Error::DestinationUnopenable { code }
}

#[cold]
#[inline(never)]
pub(crate) fn write_error(code: i32) -> Error {
    Error::Write { code }
}

#[cold]
#[inline(never)]
pub(crate) fn short_write_error(written: usize, expected: usize) -> Error {
    Error::WriteIncomplete { written, expected }
}

#[cold]
#[inline(never)]
#[allow(unused)]
pub(crate) fn clock_error(code: i32) -> Error {
    Error::Clock { code }
}

#[cold]
#[inline(never)]
pub(crate) fn overflow_error(capacity: usize) -> Error {
    Error::Overflow { capacity }
}

/// The result of one logging call.
///
/// A lifecycle caller has nothing useful to do with a failure, so this type
/// carries the failure only as a detail for tests and development hosts.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    inner: Result<(), Error>,
}

impl Outcome {
    #[inline]
    pub(crate) fn from_result(inner: Result<(), Error>) -> Self {
        #[cfg(feature = "log")]
        match &inner {
            Ok(()) => log::trace!("lifecycle record appended"),
            Err(err) => log::debug!("lifecycle record dropped: {err}"),
        }
        Self { inner }
    }

    /// Whether a record reached the log file.
    #[inline]
    pub fn is_written(&self) -> bool {
        self.inner.is_ok()
    }

    /// Why no record was written, if none was.
    #[inline]
    pub fn detail(&self) -> Option<&Error> {
        self.inner.as_ref().err()
    }
}

impl Debug for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.inner {
            Ok(()) => f.write_str("Outcome::Written"),
            Err(err) => f.debug_tuple("Outcome::Dropped").field(err).finish(),
        }
    }
}
