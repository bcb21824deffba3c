//! Host error channel
//!
//! Failures are logged, kept as the calling thread's last error, and handed
//! to the handler the host registered, if any.

use crate::error::{FfiError, NFD_OK};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::ptr;

/// Called with a NUL-terminated message that is only valid for the call.
pub type ErrorHandler = extern "C" fn(message: *const c_char);

static ERROR_HANDLER: RwLock<Option<ErrorHandler>> = parking_lot::const_rwlock(None);

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

pub fn set_handler(handler: Option<ErrorHandler>) {
    *ERROR_HANDLER.write() = handler;
}

pub fn report(context: &str, err: &FfiError) {
    let message = format!("{}: {}", context, err);
    log::error!("{}", message);

    let message = CString::new(message.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message.clone()));

    // The handler may re-enter the exports, so neither lock nor borrow is held.
    let handler = *ERROR_HANDLER.read();
    if let Some(handler) = handler {
        handler(message.as_ptr());
    }
}

pub fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Valid until the next export call on this thread; null when the last call
/// succeeded.
pub fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    })
}

/// Runs one export body and turns its outcome into a status code.
pub fn guard<F>(context: &str, body: F) -> c_int
where
    F: FnOnce() -> Result<(), FfiError>,
{
    clear_last_error();
    match body() {
        Ok(()) => NFD_OK,
        Err(err) => {
            report(context, &err);
            err.code()
        }
    }
}
