#![allow(dead_code)]

use modlog::{ModuleHandle, NativePath, OsImpl, Platform, Result, Timestamp};
use regex::Regex;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type Unit = <OsImpl as Platform>::Unit;

/// The timestamp and tag opener every record starts with.
pub const RECORD_PREFIX: &str = r"\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}\] \[";

static ANCHOR: u8 = 0;

/// A stand-in handle; [`TempModule`] ignores its value.
pub fn handle() -> ModuleHandle {
    ModuleHandle::containing(&ANCHOR).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(unix)]
pub fn units(path: &Path) -> Vec<Unit> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(windows)]
pub fn units(path: &Path) -> Vec<Unit> {
    use std::os::windows::ffi::OsStrExt;
    path.as_os_str().encode_wide().collect()
}

/// A platform whose module lives at a chosen path inside a scratch
/// directory. Everything else is the real OS.
pub struct TempModule {
    dir: TempDir,
    module: PathBuf,
}

impl TempModule {
    pub fn new(relative: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join(relative);
        Self { dir, module }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn module(&self) -> &Path {
        &self.module
    }

    pub fn log_path(&self) -> PathBuf {
        self.module.with_extension("log")
    }

    pub fn read_log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// Records in file order, line endings stripped. Panics if the file
    /// ends in a partial line.
    pub fn records(&self) -> Vec<String> {
        let content = self.read_log();
        assert!(content.is_empty() || content.ends_with("\r\n"));
        content
            .split_terminator("\r\n")
            .map(str::to_owned)
            .collect()
    }
}

impl Platform for TempModule {
    type Unit = Unit;

    fn module_path(&self, _module: ModuleHandle, out: &mut NativePath<Unit>) -> Result<()> {
        out.clear();
        out.extend_from_slice(&units(&self.module))
    }

    fn executable_path(&self, out: &mut NativePath<Unit>) -> Result<()> {
        OsImpl.executable_path(out)
    }

    fn process_id(&self) -> u32 {
        OsImpl.process_id()
    }

    fn local_time(&self) -> Result<Timestamp> {
        OsImpl.local_time()
    }

    fn append(&self, path: &[Unit], bytes: &[u8]) -> Result<()> {
        OsImpl.append(path, bytes)
    }
}

/// Matches one whole record line, line ending excluded.
pub fn record_pattern(tag: &str, message: &str) -> Regex {
    Regex::new(&format!(
        "^{RECORD_PREFIX}{}\\]: {}$",
        regex::escape(tag),
        regex::escape(message)
    ))
    .unwrap()
}
