//! Bodies of the `DllRegisterServer` / `DllUnregisterServer` exports.
//!
//! Registration tooling calls these by name after loading the module, so
//! the identity holder is already populated and records land in the same
//! log as the lifecycle notifications.

use crate::{Logger, OsImpl, Platform, identity};

/// `S_OK`.
pub const S_OK: i32 = 0;

pub const REGISTRATION_TAG: &str = "DllRegisterServer";
pub const UNREGISTRATION_TAG: &str = "DllUnregisterServer";

/// Logs the registration steps. Always returns [`S_OK`].
#[inline]
pub fn register_server() -> i32 {
    register_with(&OsImpl)
}

/// Logs the unregistration steps. Always returns [`S_OK`].
#[inline]
pub fn unregister_server() -> i32 {
    unregister_with(&OsImpl)
}

pub fn register_with<P: Platform>(platform: &P) -> i32 {
    let logger = Logger::new(identity::get(), platform);
    let _ = logger.append_record(REGISTRATION_TAG, "Registration started");
    // No class objects are published yet; registration is the log alone.
    let _ = logger.append_record(REGISTRATION_TAG, "Registration completed successfully");
    S_OK
}

pub fn unregister_with<P: Platform>(platform: &P) -> i32 {
    let logger = Logger::new(identity::get(), platform);
    let _ = logger.append_record(UNREGISTRATION_TAG, "Unregistration started");
    let _ = logger.append_record(UNREGISTRATION_TAG, "Unregistration completed successfully");
    S_OK
}
