mod common;

use common::{TempModule, handle, init_logging, record_pattern};
use modlog::{
    Error, Logger, PROCESS_INFO_TAG, identity,
    lifecycle::{ENTRY_POINT_TAG, Reason, dispatch, on_notification},
    registration::{REGISTRATION_TAG, S_OK, UNREGISTRATION_TAG, register_with, unregister_with},
};
use rstest::rstest;
use std::sync::{Mutex, MutexGuard};

/// The identity holder is process-wide; tests touching it take turns.
static SLOT: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    init_logging();
    let guard = SLOT.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    identity::clear();
    guard
}

#[test]
fn full_lifecycle_is_logged_in_order() {
    let _slot = exclusive();
    let module = TempModule::new("Bar.dll");

    assert!(dispatch(&module, Some(handle()), Reason::ProcessAttach.as_raw()));
    assert_eq!(identity::get(), Some(handle()));
    assert!(dispatch(&module, None, Reason::ThreadAttach.as_raw()));
    assert!(dispatch(&module, None, Reason::ThreadDetach.as_raw()));
    assert!(dispatch(&module, Some(handle()), Reason::ProcessDetach.as_raw()));

    let records = module.records();
    assert_eq!(records.len(), 5);
    assert!(records[0].contains(&format!("[{PROCESS_INFO_TAG}]: Process=")));
    for (record, reason) in records[1..].iter().zip([
        Reason::ProcessAttach,
        Reason::ThreadAttach,
        Reason::ThreadDetach,
        Reason::ProcessDetach,
    ]) {
        assert!(
            record_pattern(ENTRY_POINT_TAG, reason.description()).is_match(record),
            "{record:?}"
        );
    }
}

#[test]
fn nothing_is_logged_after_process_detach() {
    let _slot = exclusive();
    let module = TempModule::new("Bar.dll");

    dispatch(&module, Some(handle()), Reason::ProcessAttach.as_raw());
    dispatch(&module, None, Reason::ProcessDetach.as_raw());
    assert_eq!(identity::get(), None);
    let before = module.read_log();

    assert!(dispatch(&module, None, Reason::ThreadAttach.as_raw()));
    let outcome = Logger::new(identity::get(), &module).append_record("late", "call");
    assert_eq!(outcome.detail(), Some(&Error::IdentityUnresolved));
    assert_eq!(module.read_log(), before);
}

#[test]
fn nothing_is_logged_before_process_attach() {
    let _slot = exclusive();
    let module = TempModule::new("Bar.dll");

    assert!(dispatch(&module, None, Reason::ThreadAttach.as_raw()));
    assert!(dispatch(&module, None, Reason::ProcessAttach.as_raw()));
    assert!(!module.log_path().exists());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(u32::MAX)]
fn every_notification_reports_success(#[case] code: u32) {
    let _slot = exclusive();
    let unwritable = TempModule::new("gone/Bar.dll");
    assert!(dispatch(&unwritable, Some(handle()), code));

    let writable = TempModule::new("Bar.dll");
    identity::set(handle());
    assert!(dispatch(&writable, Some(handle()), code));
    assert!(!writable.records().is_empty());

    identity::clear();
    assert!(on_notification(None, code));
}

#[test]
fn unknown_reason_is_logged() {
    let _slot = exclusive();
    let module = TempModule::new("Bar.dll");
    identity::set(handle());

    assert!(dispatch(&module, Some(handle()), 7));
    let records = module.records();
    assert_eq!(records.len(), 1);
    assert!(record_pattern(ENTRY_POINT_TAG, "Unknown reason 7").is_match(&records[0]));
}

#[test]
fn registration_logs_both_steps() {
    let _slot = exclusive();
    let module = TempModule::new("Bar.dll");
    identity::set(handle());

    assert_eq!(register_with(&module), S_OK);
    assert_eq!(unregister_with(&module), S_OK);

    let records = module.records();
    let expected = [
        (REGISTRATION_TAG, "Registration started"),
        (REGISTRATION_TAG, "Registration completed successfully"),
        (UNREGISTRATION_TAG, "Unregistration started"),
        (UNREGISTRATION_TAG, "Unregistration completed successfully"),
    ];
    assert_eq!(records.len(), expected.len());
    for (record, (tag, message)) in records.iter().zip(expected) {
        assert!(record_pattern(tag, message).is_match(record), "{record:?}");
    }
}

#[test]
fn registration_without_module_still_succeeds() {
    let _slot = exclusive();
    let module = TempModule::new("Bar.dll");

    assert_eq!(register_with(&module), S_OK);
    assert!(!module.log_path().exists());
}
