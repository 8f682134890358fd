//! # modlog
//! Lifecycle logging for dynamically loaded modules.
//! ## Usage
//! A module built on `modlog` forwards each loader notification to
//! [`lifecycle::on_notification`]. Every notification, plus one record
//! describing the host process, is appended to a `.log` file that sits next
//! to the module binary:
//!
//! ```text
//! [2026-10-14 09:12:03.417] [ProcessInfo]: Process=host.exe PID=4120 Path=C:\Tools\host.exe
//! [2026-10-14 09:12:03.418] [DllMain]: DLL_PROCESS_ATTACH - DLL loaded into process
//! ```
//!
//! Notifications may arrive while the host holds its loader lock. The
//! logging path therefore never allocates, never holds a file open between
//! calls, never retries, and never reports a failure to its caller: when a
//! record cannot be written it is simply missing from the log.
#![no_std]

#[cfg(test)]
extern crate std;

mod buf;
mod error;
pub mod identity;
pub mod lifecycle;
mod logger;
pub mod os;
pub mod path;
mod process;
pub mod registration;
mod timestamp;

pub use buf::FixedBuf;
pub use error::{Error, Outcome};
pub use identity::ModuleHandle;
pub use logger::{Logger, MAX_RECORD_LEN, PROCESS_INFO_TAG, Record, format_record};
pub use os::{MAX_PATH_UNITS, NativePath, OsImpl, Platform};
pub use process::ProcessDescriptor;
pub use timestamp::Timestamp;

/// Extension of the log file, without the dot.
pub const LOG_EXTENSION: &str = "log";

pub type Result<T> = core::result::Result<T, Error>;
