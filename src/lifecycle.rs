//! The lifecycle notification handler behind the module entry point.

use crate::{Logger, ModuleHandle, OsImpl, Platform, identity};

/// Tag of the per-notification record.
pub const ENTRY_POINT_TAG: &str = "DllMain";

/// Why the host is notifying the module. The discriminants are the native
/// `DLL_*` reason codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Reason {
    ProcessDetach = 0,
    ProcessAttach = 1,
    ThreadAttach = 2,
    ThreadDetach = 3,
}

impl Reason {
    #[inline]
    pub const fn from_raw(code: u32) -> Option<Self> {
        match code {
            0 => Some(Reason::ProcessDetach),
            1 => Some(Reason::ProcessAttach),
            2 => Some(Reason::ThreadAttach),
            3 => Some(Reason::ThreadDetach),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// The message logged for this notification.
    pub const fn description(self) -> &'static str {
        match self {
            Reason::ProcessAttach => "DLL_PROCESS_ATTACH - DLL loaded into process",
            Reason::ThreadAttach => "DLL_THREAD_ATTACH - New thread created",
            Reason::ThreadDetach => "DLL_THREAD_DETACH - Thread exiting cleanly",
            Reason::ProcessDetach => "DLL_PROCESS_DETACH - DLL unloaded from process",
        }
    }
}

/// Handles one lifecycle notification delivered to the module entry point.
///
/// On process attach the handle is stored and a process record written
/// first. Every notification then gets one `DllMain` record. On process
/// detach the stored handle is cleared after that record, so nothing logs
/// once the module is gone.
///
/// Always returns `true`: the entry point has no failure to report.
#[inline]
pub fn on_notification(module: Option<ModuleHandle>, code: u32) -> bool {
    dispatch(&OsImpl, module, code)
}

/// [`on_notification`] against an explicit platform.
pub fn dispatch<P: Platform>(platform: &P, module: Option<ModuleHandle>, code: u32) -> bool {
    let Some(reason) = Reason::from_raw(code) else {
        let logger = Logger::new(identity::get(), platform);
        let _ = logger.append_display(ENTRY_POINT_TAG, format_args!("Unknown reason {code}"));
        return true;
    };

    if reason == Reason::ProcessAttach {
        if let Some(module) = module {
            identity::set(module);
        }
        let _ = Logger::new(identity::get(), platform).append_process_record();
    }

    let _ = Logger::new(identity::get(), platform)
        .append_record(ENTRY_POINT_TAG, reason.description());

    if reason == Reason::ProcessDetach {
        identity::clear();
    }
    true
}
