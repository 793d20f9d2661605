//! Greeting Context
//!
//! The state behind the opaque `HellowContext *` handed out by the C ABI.
//! Rust callers can use it directly; everyone else goes through [`ffi`].

pub mod ffi;

use std::io::{self, Write};

/// Prefix used until a caller sets another one.
pub const DEFAULT_PREFIX: &str = "Hello";

/// Library-owned greeting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HellowContext {
    name: String,
    prefix: String,
}

impl HellowContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// The line `say_hi` writes, without the trailing newline.
    pub fn greeting(&self) -> String {
        self.greeting_for(&self.name)
    }

    /// Greeting addressed to `who` instead of the stored name.
    pub fn greeting_for(&self, who: &str) -> String {
        format!("{} {}", self.prefix, who)
    }

    /// Write the greeting for the stored name to standard output.
    pub fn say_hi(&self) -> io::Result<()> {
        self.say_hi_to(&mut io::stdout().lock())
    }

    pub fn say_hi_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.greeting())?;
        out.flush()
    }

    /// Write a greeting for `who` to standard output. The stored name is untouched.
    pub fn announce(&self, who: &str) -> io::Result<()> {
        self.announce_to(&mut io::stdout().lock(), who)
    }

    pub fn announce_to<W: Write>(&self, out: &mut W, who: &str) -> io::Result<()> {
        writeln!(out, "{}", self.greeting_for(who))?;
        out.flush()
    }
}

impl Default for HellowContext {
    fn default() -> Self {
        Self {
            name: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}
