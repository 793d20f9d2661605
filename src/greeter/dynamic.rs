//! Boundary resolved at runtime from a shared `libhellow`.

use std::ffi::{c_void, CString};
use std::path::Path;

use libc::c_char;

use crate::error::{GreeterError, GreeterResult};
use crate::ffi::{DynamicLibrary, FfiError, LibraryLoader};

use super::{check, ContextHandle, Hellow};

type NewFn = unsafe extern "C" fn() -> *mut c_void;
type SetStringFn = unsafe extern "C" fn(*mut c_void, *const c_char) -> isize;
type SayHiFn = unsafe extern "C" fn(*const c_void);
type AnnounceFn = unsafe extern "C" fn(*const c_void, *const c_char) -> isize;

/// `libhellow` opened with libloading.
///
/// The function pointers are only valid while `library` is loaded, so they
/// live in the same struct and never leave it.
#[derive(Debug)]
pub struct DynamicHellow {
    library: DynamicLibrary,
    new: NewFn,
    set_name: SetStringFn,
    say_hi: SayHiFn,
    set_prefix: Option<SetStringFn>,
    announce: Option<AnnounceFn>,
}

impl DynamicHellow {
    /// Find `name` with `loader` and resolve the greeting symbols.
    pub fn load(loader: &LibraryLoader, name: &str) -> GreeterResult<Self> {
        Ok(Self::from_library(loader.load(name)?)?)
    }

    /// Open the library at `path` and resolve the greeting symbols.
    pub fn open(path: impl AsRef<Path>) -> GreeterResult<Self> {
        Ok(Self::from_library(DynamicLibrary::load(path)?)?)
    }

    fn from_library(library: DynamicLibrary) -> Result<Self, FfiError> {
        // Safety: the aliases above mirror the signatures in include/hellow.h.
        unsafe {
            Ok(Self {
                new: library.function("Hellow_new")?,
                set_name: library.function("Hellow_set_name")?,
                say_hi: library.function("Hellow_say_hi")?,
                set_prefix: library.optional_function("Hellow_set_prefix")?,
                announce: library.optional_function("Hellow_announce")?,
                library,
            })
        }
    }

    pub fn path(&self) -> &Path {
        self.library.path()
    }

    pub fn supports_prefix(&self) -> bool {
        self.set_prefix.is_some()
    }

    pub fn supports_announce(&self) -> bool {
        self.announce.is_some()
    }
}

impl Hellow for DynamicHellow {
    type Context = ContextHandle;

    fn create_context(&mut self) -> GreeterResult<ContextHandle> {
        ContextHandle::from_raw(unsafe { (self.new)() })
    }

    fn set_name(&mut self, ctx: &mut ContextHandle, name: &str) -> GreeterResult<()> {
        let name = CString::new(name).map_err(|e| GreeterError::invalid_string("name", e))?;
        check("set_name", unsafe {
            (self.set_name)(ctx.as_ptr(), name.as_ptr())
        })
    }

    fn say_hi(&mut self, ctx: &ContextHandle) -> GreeterResult<()> {
        unsafe { (self.say_hi)(ctx.as_ptr()) };
        Ok(())
    }

    fn set_prefix(&mut self, ctx: &mut ContextHandle, prefix: &str) -> GreeterResult<()> {
        let set_prefix = self
            .set_prefix
            .ok_or(GreeterError::Unsupported("set_prefix"))?;
        let prefix =
            CString::new(prefix).map_err(|e| GreeterError::invalid_string("prefix", e))?;
        check("set_prefix", unsafe {
            set_prefix(ctx.as_ptr(), prefix.as_ptr())
        })
    }

    fn announce(&mut self, ctx: &ContextHandle, who: &str) -> GreeterResult<()> {
        let announce = self.announce.ok_or(GreeterError::Unsupported("announce"))?;
        let who = CString::new(who).map_err(|e| GreeterError::invalid_string("announcement", e))?;
        check("announce", unsafe { announce(ctx.as_ptr(), who.as_ptr()) })
    }
}
