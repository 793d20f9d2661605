//! Greeter
//!
//! Drives a greeting library through its foreign boundary:
//! create a context, set the name, say hi.
//!
//! The boundary is the [`Hellow`] trait. [`LinkedHellow`] calls the C ABI
//! functions linked into this binary, [`DynamicHellow`] resolves the same
//! symbols from a shared library at runtime, and tests substitute their own
//! implementation.

mod dynamic;
mod linked;

pub use dynamic::DynamicHellow;
pub use linked::LinkedHellow;

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::context::ffi::Status;
use crate::error::{GreeterError, GreeterResult};

/// Capability interface over the greeting library.
///
/// Only the first three operations are required. Libraries built before
/// prefixes and announcements existed report them as unsupported.
pub trait Hellow {
    /// Handle to library-owned context state
    type Context;

    fn create_context(&mut self) -> GreeterResult<Self::Context>;

    fn set_name(&mut self, ctx: &mut Self::Context, name: &str) -> GreeterResult<()>;

    fn say_hi(&mut self, ctx: &Self::Context) -> GreeterResult<()>;

    fn set_prefix(&mut self, _ctx: &mut Self::Context, _prefix: &str) -> GreeterResult<()> {
        Err(GreeterError::Unsupported("set_prefix"))
    }

    fn announce(&mut self, _ctx: &Self::Context, _who: &str) -> GreeterResult<()> {
        Err(GreeterError::Unsupported("announce"))
    }
}

/// Non-owning reference to a context that lives inside the native library.
///
/// Copying the handle does not copy the context, and dropping it does not
/// free anything. The library reclaims the memory at process exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextHandle(NonNull<c_void>);

impl ContextHandle {
    /// Wrap a pointer returned by the context factory.
    pub fn from_raw(ptr: *mut c_void) -> GreeterResult<Self> {
        NonNull::new(ptr).map(Self).ok_or(GreeterError::NullContext)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Turn a status code returned by `operation` into a result.
fn check(operation: &'static str, code: isize) -> GreeterResult<()> {
    match Status::from_code(code) {
        Status::Ok => Ok(()),
        status => Err(GreeterError::Status { operation, status }),
    }
}

/// What to do once the context exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Greeting {
    /// Name passed to set-name
    pub name: String,
    /// Optional prefix set before the name
    pub prefix: Option<String>,
    /// Addressees announced after saying hi
    pub announce: Vec<String>,
}

impl Greeting {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a greeting from command-line style arguments; the first one is
    /// the name. Fails before touching any library when it is missing.
    pub fn from_args<I, S>(args: I) -> GreeterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        args.into_iter()
            .next()
            .map(Self::new)
            .ok_or(GreeterError::MissingName)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_announcements(mut self, who: impl IntoIterator<Item = String>) -> Self {
        self.announce.extend(who);
        self
    }
}

/// Sequences calls against a [`Hellow`] boundary.
pub struct Greeter<H: Hellow> {
    hellow: H,
}

impl<H: Hellow> Greeter<H> {
    pub fn new(hellow: H) -> Self {
        Self { hellow }
    }

    pub fn hellow(&self) -> &H {
        &self.hellow
    }

    pub fn into_inner(self) -> H {
        self.hellow
    }

    /// create-context -> [set-prefix] -> set-name -> say-hi -> [announce...]
    ///
    /// Every failure is fatal: the sequence stops at the first error.
    /// Returns the context so callers may keep using it.
    pub fn greet(&mut self, greeting: &Greeting) -> GreeterResult<H::Context> {
        let mut ctx = self.hellow.create_context()?;
        tracing::debug!("context created");

        if let Some(prefix) = &greeting.prefix {
            self.hellow.set_prefix(&mut ctx, prefix)?;
            tracing::debug!(prefix = %prefix, "prefix set");
        }

        self.hellow.set_name(&mut ctx, &greeting.name)?;
        tracing::debug!(name = %greeting.name, "name set");

        self.hellow.say_hi(&ctx)?;

        for who in &greeting.announce {
            self.hellow.announce(&ctx, who)?;
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests;
