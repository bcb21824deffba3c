//! Error types for the foreign-function boundary

use nfdlookup::LookupError;
use std::os::raw::c_int;
use thiserror::Error;

pub const NFD_OK: c_int = 0;
pub const NFD_ERR_NULL_POINTER: c_int = -1;
pub const NFD_ERR_INVALID_UTF8: c_int = -2;
pub const NFD_ERR_BUFFER_TOO_SMALL: c_int = -3;
pub const NFD_ERR_LOOKUP: c_int = -4;

#[derive(Debug, Error)]
pub enum FfiError {
    #[error("{0} must not be null")]
    NullPointer(&'static str),
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
    #[error("output buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl FfiError {
    /// Status code returned across the C ABI.
    pub fn code(&self) -> c_int {
        match self {
            FfiError::NullPointer(_) => NFD_ERR_NULL_POINTER,
            FfiError::InvalidUtf8(_) => NFD_ERR_INVALID_UTF8,
            FfiError::BufferTooSmall { .. } => NFD_ERR_BUFFER_TOO_SMALL,
            FfiError::Lookup(_) => NFD_ERR_LOOKUP,
        }
    }
}
