//! C ABI exports for generic plugin loaders
//!
//! Every export returns `NFD_OK` (0) or a negative status code. Inputs are
//! validated before anything is written, so output buffers are untouched on
//! failure. Text outputs are NUL-terminated and need one extra byte.

use crate::error::FfiError;
use crate::report::{self, guard, ErrorHandler};
use nfdlookup::address::ADDRESS_TEXT_LEN;
use nfdlookup::logicsig::registry_app_id_from_i64;
use nfdlookup::txid::TXID_TEXT_LEN;
use nfdlookup::{
    address_bin_to_txt, address_txt_to_bin, name_lookup_address,
    reverse_address_bin_lookup_address, reverse_address_lookup_address, txid_bin_to_txt,
    txid_txt_to_bin,
};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::slice;

/// Bytes needed for a text address plus its terminator.
pub const NFD_ADDRESS_TEXT_BUF: usize = ADDRESS_TEXT_LEN + 1;
/// Bytes needed for a text transaction ID plus its terminator.
pub const NFD_TXID_TEXT_BUF: usize = TXID_TEXT_LEN + 1;

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

unsafe fn read_str<'a>(ptr: *const c_char, what: &'static str) -> Result<&'a str, FfiError> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer(what));
    }
    // SAFETY: the caller passes a NUL-terminated string that outlives the call.
    let text = unsafe { CStr::from_ptr(ptr) };
    text.to_str().map_err(|_| FfiError::InvalidUtf8(what))
}

unsafe fn read_bytes<'a>(
    ptr: *const u8,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], FfiError> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer(what));
    }
    // SAFETY: the caller guarantees `len` readable bytes at `ptr`.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

fn check_out(out: *mut u8, out_len: usize, needed: usize) -> Result<(), FfiError> {
    if out.is_null() {
        return Err(FfiError::NullPointer("out"));
    }
    if out_len < needed {
        return Err(FfiError::BufferTooSmall {
            needed,
            got: out_len,
        });
    }
    Ok(())
}

unsafe fn write_bytes(out: *mut u8, out_len: usize, data: &[u8]) -> Result<(), FfiError> {
    check_out(out, out_len, data.len())?;
    // SAFETY: `out` is non-null and holds at least `data.len()` bytes.
    let dst = unsafe { slice::from_raw_parts_mut(out, data.len()) };
    dst.copy_from_slice(data);
    Ok(())
}

unsafe fn write_text(out: *mut u8, out_len: usize, text: &str) -> Result<(), FfiError> {
    let needed = text.len() + 1;
    check_out(out, out_len, needed)?;
    // SAFETY: `out` is non-null and holds at least `needed` bytes.
    let dst = unsafe { slice::from_raw_parts_mut(out, needed) };
    dst[..text.len()].copy_from_slice(text.as_bytes());
    dst[text.len()] = 0;
    Ok(())
}

/// Registers (or clears, with null) the host's error callback.
#[no_mangle]
pub extern "C" fn nfd_set_error_handler(handler: Option<ErrorHandler>) {
    report::set_handler(handler);
}

/// Message of the last failed call on this thread, or null.
#[no_mangle]
pub extern "C" fn nfd_last_error() -> *const c_char {
    report::last_error_ptr()
}

#[no_mangle]
pub extern "C" fn nfd_version() -> *const c_char {
    VERSION.as_ptr().cast()
}

/// Text address to its 32-byte public key.
///
/// # Safety
/// `text` must be NUL-terminated; `out` must hold `out_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn nfd_address_txt2bin(
    text: *const c_char,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_address_txt2bin", || {
        let text = unsafe { read_str(text, "text")? };
        let key = address_txt_to_bin(text)?;
        unsafe { write_bytes(out, out_len, &key) }
    })
}

/// 32-byte public key to its NUL-terminated text address.
///
/// # Safety
/// `bytes` must hold `bytes_len` readable bytes; `out` must hold `out_len`
/// writable bytes.
#[no_mangle]
pub unsafe extern "C" fn nfd_address_bin2txt(
    bytes: *const u8,
    bytes_len: usize,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_address_bin2txt", || {
        let bytes = unsafe { read_bytes(bytes, bytes_len, "bytes")? };
        let text = address_bin_to_txt(bytes)?;
        unsafe { write_text(out, out_len, &text) }
    })
}

/// Text transaction ID to its 32-byte digest.
///
/// # Safety
/// Same contract as [`nfd_address_txt2bin`].
#[no_mangle]
pub unsafe extern "C" fn nfd_txid_txt2bin(
    text: *const c_char,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_txid_txt2bin", || {
        let text = unsafe { read_str(text, "text")? };
        let digest = txid_txt_to_bin(text)?;
        unsafe { write_bytes(out, out_len, &digest) }
    })
}

/// 32-byte digest to its NUL-terminated text transaction ID.
///
/// # Safety
/// Same contract as [`nfd_address_bin2txt`].
#[no_mangle]
pub unsafe extern "C" fn nfd_txid_bin2txt(
    bytes: *const u8,
    bytes_len: usize,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_txid_bin2txt", || {
        let bytes = unsafe { read_bytes(bytes, bytes_len, "bytes")? };
        let text = txid_bin_to_txt(bytes)?;
        unsafe { write_text(out, out_len, &text) }
    })
}

/// Writes the 32-byte escrow account holding the forward lookup for `name`.
///
/// # Safety
/// `name` must be NUL-terminated; `out` must hold `out_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn nfd_sig_name_lsig(
    name: *const c_char,
    registry_app_id: i64,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_sig_name_lsig", || {
        let name = unsafe { read_str(name, "name")? };
        let app_id = registry_app_id_from_i64(registry_app_id)?;
        let account = name_lookup_address(name, app_id)?;
        unsafe { write_bytes(out, out_len, account.as_bytes()) }
    })
}

/// Writes the 32-byte escrow account holding the reverse lookup for a text
/// address.
///
/// # Safety
/// `address` must be NUL-terminated; `out` must hold `out_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn nfd_sig_rev_address_lsig(
    address: *const c_char,
    registry_app_id: i64,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_sig_rev_address_lsig", || {
        let address = unsafe { read_str(address, "address")? };
        let app_id = registry_app_id_from_i64(registry_app_id)?;
        let account = reverse_address_lookup_address(address, app_id)?;
        unsafe { write_bytes(out, out_len, account.as_bytes()) }
    })
}

/// Same as [`nfd_sig_rev_address_lsig`] for a raw 32-byte public key.
///
/// # Safety
/// `bytes` must hold `bytes_len` readable bytes; `out` must hold `out_len`
/// writable bytes.
#[no_mangle]
pub unsafe extern "C" fn nfd_sig_rev_address_bin_lsig(
    bytes: *const u8,
    bytes_len: usize,
    registry_app_id: i64,
    out: *mut u8,
    out_len: usize,
) -> c_int {
    guard("nfd_sig_rev_address_bin_lsig", || {
        let bytes = unsafe { read_bytes(bytes, bytes_len, "bytes")? };
        let app_id = registry_app_id_from_i64(registry_app_id)?;
        let account = reverse_address_bin_lookup_address(bytes, app_id)?;
        unsafe { write_bytes(out, out_len, account.as_bytes()) }
    })
}
