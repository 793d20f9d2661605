//! C ABI for [`HellowContext`].
//!
//! Every string argument is copied; no caller pointer outlives the call.
//! Failures are reported as status codes and never unwind into the caller.

#![allow(non_snake_case)]

use std::fmt;

use libc::c_char;

use crate::context::HellowContext;
use crate::utils::try_parse_c_str;

/// Call succeeded
pub const HELLOW_OK: isize = 0;
/// The context pointer was null
pub const HELLOW_ERR_NULL_CONTEXT: isize = -1;
/// A string argument was null
pub const HELLOW_ERR_NULL_STRING: isize = -2;
/// A string argument was not valid UTF-8
pub const HELLOW_ERR_INVALID_UTF8: isize = -3;

/// Status codes returned across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NullContext,
    NullString,
    InvalidUtf8,
    /// A code this crate does not know, e.g. from a newer library build
    Unknown(isize),
}

impl Status {
    pub fn code(self) -> isize {
        match self {
            Status::Ok => HELLOW_OK,
            Status::NullContext => HELLOW_ERR_NULL_CONTEXT,
            Status::NullString => HELLOW_ERR_NULL_STRING,
            Status::InvalidUtf8 => HELLOW_ERR_INVALID_UTF8,
            Status::Unknown(code) => code,
        }
    }

    pub fn from_code(code: isize) -> Self {
        match code {
            HELLOW_OK => Status::Ok,
            HELLOW_ERR_NULL_CONTEXT => Status::NullContext,
            HELLOW_ERR_NULL_STRING => Status::NullString,
            HELLOW_ERR_INVALID_UTF8 => Status::InvalidUtf8,
            other => Status::Unknown(other),
        }
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "ok"),
            Status::NullContext => write!(f, "null context (status {})", self.code()),
            Status::NullString => write!(f, "null string argument (status {})", self.code()),
            Status::InvalidUtf8 => write!(f, "string is not valid UTF-8 (status {})", self.code()),
            Status::Unknown(code) => write!(f, "unknown status {}", code),
        }
    }
}

/// Allocate a new context. Release it with `Hellow_free`, or let process exit do it.
#[no_mangle]
pub extern "C" fn Hellow_new() -> *mut HellowContext {
    Box::into_raw(Box::new(HellowContext::new()))
}

/// # Safety
///
/// `ctx` must be null or a pointer returned by `Hellow_new` that has not
/// been freed yet.
#[no_mangle]
pub unsafe extern "C" fn Hellow_free(ctx: *mut HellowContext) {
    if !ctx.is_null() {
        drop(Box::from_raw(ctx));
    }
}

/// # Safety
///
/// `name` must be a null terminated string that has at most isize::MAX bytes
#[no_mangle]
pub unsafe extern "C" fn Hellow_set_name(ctx: *mut HellowContext, name: *const c_char) -> isize {
    let Some(ctx) = ctx.as_mut() else {
        tracing::error!("cannot set name for null context");
        return HELLOW_ERR_NULL_CONTEXT;
    };
    let name = try_parse_c_str!(name, "name");

    ctx.set_name(name);
    HELLOW_OK
}

/// # Safety
///
/// `prefix` must be a null terminated string that has at most isize::MAX bytes
#[no_mangle]
pub unsafe extern "C" fn Hellow_set_prefix(
    ctx: *mut HellowContext,
    prefix: *const c_char,
) -> isize {
    let Some(ctx) = ctx.as_mut() else {
        tracing::error!("cannot set prefix for null context");
        return HELLOW_ERR_NULL_CONTEXT;
    };
    let prefix = try_parse_c_str!(prefix, "prefix");

    ctx.set_prefix(prefix);
    HELLOW_OK
}

/// # Safety
///
/// `ctx` must be null or a live pointer returned by `Hellow_new`.
#[no_mangle]
pub unsafe extern "C" fn Hellow_say_hi(ctx: *const HellowContext) {
    let Some(ctx) = ctx.as_ref() else {
        tracing::error!("cannot say hi with null context");
        return;
    };
    if let Err(e) = ctx.say_hi() {
        tracing::warn!(error = %e, "failed to write greeting");
    }
}

/// # Safety
///
/// `who` must be a null terminated string that has at most isize::MAX bytes
#[no_mangle]
pub unsafe extern "C" fn Hellow_announce(ctx: *const HellowContext, who: *const c_char) -> isize {
    let Some(ctx) = ctx.as_ref() else {
        tracing::error!("cannot announce with null context");
        return HELLOW_ERR_NULL_CONTEXT;
    };
    let who = try_parse_c_str!(who, "announcement");

    if let Err(e) = ctx.announce(&who) {
        tracing::warn!(error = %e, "failed to write announcement");
    }
    HELLOW_OK
}
