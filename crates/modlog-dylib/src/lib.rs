//! The loadable module.
//!
//! On Windows the loader calls `DllMain` for each notification. ELF hosts
//! have no such entry point, so process attach and detach are delivered from
//! the module's `.init_array` and `.fini_array`; thread notifications do not
//! exist there.
#![allow(non_snake_case)]

use modlog::registration;

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        use core::ffi::c_void;
        use modlog::{ModuleHandle, lifecycle::{self, Reason}};
        use windows_sys::Win32::{
            Foundation::{BOOL, HINSTANCE, TRUE},
            System::SystemServices::{
                DLL_PROCESS_ATTACH, DLL_PROCESS_DETACH, DLL_THREAD_ATTACH, DLL_THREAD_DETACH,
            },
        };

        const _: () = {
            assert!(DLL_PROCESS_ATTACH == Reason::ProcessAttach.as_raw());
            assert!(DLL_PROCESS_DETACH == Reason::ProcessDetach.as_raw());
            assert!(DLL_THREAD_ATTACH == Reason::ThreadAttach.as_raw());
            assert!(DLL_THREAD_DETACH == Reason::ThreadDetach.as_raw());
        };

        #[unsafe(no_mangle)]
        pub extern "system" fn DllMain(module: HINSTANCE, reason: u32, _reserved: *mut c_void) -> BOOL {
            lifecycle::on_notification(ModuleHandle::new(module), reason);
            TRUE
        }
    } else if #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly",
    ))] {
        use modlog::{ModuleHandle, identity, lifecycle::{self, Reason}};

        extern "C" fn on_load() {
            // Any address inside the image identifies it to `dladdr`.
            let module = ModuleHandle::containing(on_load as *const ());
            lifecycle::on_notification(module, Reason::ProcessAttach.as_raw());
        }

        extern "C" fn on_unload() {
            lifecycle::on_notification(identity::get(), Reason::ProcessDetach.as_raw());
        }

        #[used]
        #[unsafe(link_section = ".init_array")]
        static ON_LOAD: extern "C" fn() = on_load;

        #[used]
        #[unsafe(link_section = ".fini_array")]
        static ON_UNLOAD: extern "C" fn() = on_unload;
    }
}

/// Registration entry point invoked by registration tooling.
#[unsafe(no_mangle)]
pub extern "system" fn DllRegisterServer() -> i32 {
    registration::register_server()
}

#[unsafe(no_mangle)]
pub extern "system" fn DllUnregisterServer() -> i32 {
    registration::unregister_server()
}
