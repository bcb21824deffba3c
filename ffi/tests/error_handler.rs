//! Error handlers that call back into the exports.
//!
//! Kept in its own test binary: the handler is process-wide.

use nfd_lookup_ffi::error::NFD_ERR_LOOKUP;
use nfd_lookup_ffi::plugin::*;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

static UNREGISTER_CALLS: AtomicUsize = AtomicUsize::new(0);
static SAW_LAST_ERROR: AtomicBool = AtomicBool::new(false);
static REENTER_CALLS: AtomicUsize = AtomicUsize::new(0);
static NESTED_CODE: AtomicUsize = AtomicUsize::new(0);

extern "C" fn unregister_self(message: *const c_char) {
    UNREGISTER_CALLS.fetch_add(1, Ordering::SeqCst);
    nfd_set_error_handler(None);

    let last = nfd_last_error();
    if !last.is_null() {
        let last = unsafe { CStr::from_ptr(last) };
        let message = unsafe { CStr::from_ptr(message) };
        SAW_LAST_ERROR.store(last == message, Ordering::SeqCst);
    }
}

extern "C" fn reenter_once(_message: *const c_char) {
    if REENTER_CALLS.fetch_add(1, Ordering::SeqCst) > 0 {
        return;
    }
    let bad = CString::new("BAD").unwrap();
    let mut out = [0u8; 32];
    let code = unsafe { nfd_address_txt2bin(bad.as_ptr(), out.as_mut_ptr(), out.len()) };
    NESTED_CODE.store(code.unsigned_abs() as usize, Ordering::SeqCst);
}

/// Runs a failing export on a worker so a deadlock fails the test instead of
/// hanging it.
fn fail_on_worker() -> i32 {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let key = [0u8; 3];
        let mut out = [0u8; NFD_ADDRESS_TEXT_BUF];
        let code =
            unsafe { nfd_address_bin2txt(key.as_ptr(), key.len(), out.as_mut_ptr(), out.len()) };
        let _ = tx.send(code);
    });
    rx.recv_timeout(Duration::from_secs(5))
        .expect("export did not return while the handler re-entered")
}

#[test]
fn test_handlers_may_reenter_the_exports() {
    // A handler that unregisters itself and reads the last error.
    nfd_set_error_handler(Some(unregister_self));
    assert_eq!(fail_on_worker(), NFD_ERR_LOOKUP);
    assert_eq!(UNREGISTER_CALLS.load(Ordering::SeqCst), 1);
    assert!(SAW_LAST_ERROR.load(Ordering::SeqCst));

    // It is gone now.
    assert_eq!(fail_on_worker(), NFD_ERR_LOOKUP);
    assert_eq!(UNREGISTER_CALLS.load(Ordering::SeqCst), 1);

    // A handler that triggers another failure from inside the callback.
    nfd_set_error_handler(Some(reenter_once));
    assert_eq!(fail_on_worker(), NFD_ERR_LOOKUP);
    nfd_set_error_handler(None);
    assert_eq!(REENTER_CALLS.load(Ordering::SeqCst), 2);
    assert_eq!(
        NESTED_CODE.load(Ordering::SeqCst),
        NFD_ERR_LOOKUP.unsigned_abs() as usize
    );
}
