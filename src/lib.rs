//! Hellow - greeting context behind a C ABI
//!
//! The crate builds both as an `rlib` and as a `cdylib`. The shared library
//! exports a small C interface (see `include/hellow.h`) around an opaque
//! greeting context; the `hellow` binary is a client of that interface.
//!
//! # C ABI
//!
//! ```text
//! HellowContext *Hellow_new(void);
//! void           Hellow_free(HellowContext *ctx);
//! intptr_t       Hellow_set_name(HellowContext *ctx, const char *name);
//! intptr_t       Hellow_set_prefix(HellowContext *ctx, const char *prefix);
//! void           Hellow_say_hi(const HellowContext *ctx);
//! intptr_t       Hellow_announce(const HellowContext *ctx, const char *who);
//! ```
//!
//! # Example
//!
//! ```rust
//! use hellow::greeter::{Greeter, Greeting, LinkedHellow};
//!
//! let mut greeter = Greeter::new(LinkedHellow::new());
//! greeter.greet(&Greeting::new("World")).unwrap(); // prints "Hello World"
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   hellow CLI    │  name from argv, config, logging
//! └────────┬────────┘
//!          │ Hellow trait
//!     ┌────┴─────────┐
//!     ▼              ▼
//! ┌────────┐  ┌─────────────┐
//! │ Linked │  │   Dynamic   │  libloading
//! └───┬────┘  └──────┬──────┘
//!     └──────┬───────┘
//!            ▼
//! ┌─────────────────────┐
//! │  Hellow_* C ABI     │  status codes, opaque context
//! └─────────────────────┘
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod error;
pub mod ffi;
pub mod greeter;
pub mod utils;

// Re-export commonly used types
pub use config::{Backend, ConfigError, HellowConfig};
pub use context::HellowContext;
pub use error::{GreeterError, GreeterResult};
pub use greeter::{ContextHandle, DynamicHellow, Greeter, Greeting, Hellow, LinkedHellow};
