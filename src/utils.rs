//! C string helpers for the exported ABI.

use std::ffi::CStr;
use std::str::Utf8Error;

use libc::c_char;

/// Why a `const char *` argument could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CStrError {
    Null,
    Utf8(Utf8Error),
}

/// Copy a NUL-terminated C string into an owned `String`.
///
/// # Safety
///
/// `s` must be null or point to a NUL-terminated string of at most
/// `isize::MAX` bytes that stays valid for the duration of the call.
pub unsafe fn parse_c_str(s: *const c_char) -> Result<String, CStrError> {
    if s.is_null() {
        return Err(CStrError::Null);
    }
    CStr::from_ptr(s)
        .to_str()
        .map(str::to_owned)
        .map_err(CStrError::Utf8)
}

/// Read a `const char *` argument or return the matching status code.
macro_rules! try_parse_c_str {
    ($str:ident, $what:literal) => {
        match $crate::utils::parse_c_str($str) {
            Ok(s) => s,
            Err($crate::utils::CStrError::Null) => {
                tracing::error!("null {}", $what);
                return $crate::context::ffi::Status::NullString.code();
            }
            Err($crate::utils::CStrError::Utf8(e)) => {
                tracing::error!(error = %e, "{} is not valid UTF-8", $what);
                return $crate::context::ffi::Status::InvalidUtf8.code();
            }
        }
    };
}

pub(crate) use try_parse_c_str;
