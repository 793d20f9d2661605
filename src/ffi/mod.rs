//! Native Library Loading
//!
//! Finds and opens a shared library at runtime so the greeter can call
//! into a `libhellow` that was built separately.
//!
//! # Architecture
//!
//! ```text
//! hellow --library <name|path>
//!       │
//!       ▼
//! LibraryLoader (search paths, platform file names)
//!       │
//!       ▼
//! DynamicLibrary (libloading, typed symbols)
//!       │
//!       ▼
//! Hellow_new / Hellow_set_name / Hellow_say_hi
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut loader = LibraryLoader::new();
//! loader.add_search_path("target/debug");
//! let library = loader.load("hellow")?;
//! let new: unsafe extern "C" fn() -> *mut c_void = unsafe { library.function("Hellow_new")? };
//! ```

mod loader;

pub use loader::{library_filename, DynamicLibrary, LibraryLoader};

use thiserror::Error;

/// Error type for native library operations
#[derive(Debug, Clone, Error)]
pub enum FfiError {
    /// The library file could not be opened
    #[error("Load error: {0}")]
    LoadError(String),

    /// No file matching the library name in any search path
    #[error("Library not found: {name} (searched {searched} paths)")]
    LibraryNotFound { name: String, searched: usize },

    /// Symbol not found in library
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Invalid symbol name
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),
}
