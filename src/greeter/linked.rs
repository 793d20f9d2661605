//! Boundary bound at link time: the exported C ABI of this crate.

use std::ffi::CString;

use crate::context::ffi::{
    Hellow_announce, Hellow_new, Hellow_say_hi, Hellow_set_name, Hellow_set_prefix,
};
use crate::context::HellowContext;
use crate::error::{GreeterError, GreeterResult};

use super::{check, ContextHandle, Hellow};

/// Calls `Hellow_*` through the same C ABI external clients use.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedHellow;

impl LinkedHellow {
    pub fn new() -> Self {
        Self
    }
}

fn raw(ctx: &ContextHandle) -> *mut HellowContext {
    ctx.as_ptr().cast()
}

impl Hellow for LinkedHellow {
    type Context = ContextHandle;

    fn create_context(&mut self) -> GreeterResult<ContextHandle> {
        ContextHandle::from_raw(Hellow_new().cast())
    }

    fn set_name(&mut self, ctx: &mut ContextHandle, name: &str) -> GreeterResult<()> {
        let name = CString::new(name).map_err(|e| GreeterError::invalid_string("name", e))?;
        // Safety: the handle came from Hellow_new and is never freed here.
        check("set_name", unsafe { Hellow_set_name(raw(ctx), name.as_ptr()) })
    }

    fn say_hi(&mut self, ctx: &ContextHandle) -> GreeterResult<()> {
        unsafe { Hellow_say_hi(raw(ctx)) };
        Ok(())
    }

    fn set_prefix(&mut self, ctx: &mut ContextHandle, prefix: &str) -> GreeterResult<()> {
        let prefix =
            CString::new(prefix).map_err(|e| GreeterError::invalid_string("prefix", e))?;
        check("set_prefix", unsafe {
            Hellow_set_prefix(raw(ctx), prefix.as_ptr())
        })
    }

    fn announce(&mut self, ctx: &ContextHandle, who: &str) -> GreeterResult<()> {
        let who = CString::new(who).map_err(|e| GreeterError::invalid_string("announcement", e))?;
        check("announce", unsafe { Hellow_announce(raw(ctx), who.as_ptr()) })
    }
}
