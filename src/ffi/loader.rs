//! Dynamic Library Loader
//!
//! Safe wrapper around libloading for opening shared libraries and
//! resolving typed function pointers.

use std::ffi::CString;
use std::path::{Path, PathBuf};

use libloading::Library;

use super::FfiError;

/// A dynamically loaded library
#[derive(Debug)]
pub struct DynamicLibrary {
    /// Path the library was opened from
    path: PathBuf,
    /// The loaded library handle
    library: Library,
}

impl DynamicLibrary {
    /// Load a library from the given path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FfiError> {
        let path = path.as_ref().to_path_buf();

        // Safety: opening a library runs its initializers. We trust the path
        // the user pointed us at.
        let library = unsafe {
            Library::new(&path).map_err(|e| {
                FfiError::LoadError(format!(
                    "Failed to load library '{}': {}",
                    path.display(),
                    e
                ))
            })?
        };

        tracing::debug!(path = %path.display(), "loaded native library");
        Ok(Self { path, library })
    }

    /// Get the path to this library
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `name` as a value of type `F`, normally an `extern "C" fn` pointer.
    ///
    /// # Safety
    ///
    /// `F` must match the actual type of the exported symbol, and the returned
    /// value must not be used after this library is dropped.
    pub unsafe fn function<F: Copy>(&self, name: &str) -> Result<F, FfiError> {
        let c_name = CString::new(name)
            .map_err(|_| FfiError::InvalidSymbol(format!("Invalid symbol name: {:?}", name)))?;

        let symbol = self
            .library
            .get::<F>(c_name.as_bytes_with_nul())
            .map_err(|e| {
                FfiError::SymbolNotFound(format!(
                    "Symbol '{}' not found in '{}': {}",
                    name,
                    self.path.display(),
                    e
                ))
            })?;

        Ok(*symbol)
    }

    /// Like [`function`](Self::function) but treats a missing symbol as `None`.
    ///
    /// # Safety
    ///
    /// Same contract as [`function`](Self::function).
    pub unsafe fn optional_function<F: Copy>(&self, name: &str) -> Result<Option<F>, FfiError> {
        match self.function::<F>(name) {
            Ok(f) => Ok(Some(f)),
            Err(FfiError::SymbolNotFound(msg)) => {
                tracing::debug!("{}", msg);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Library loader with search paths
#[derive(Debug, Clone)]
pub struct LibraryLoader {
    /// Directories searched in order
    search_paths: Vec<PathBuf>,
}

impl LibraryLoader {
    /// Create a loader with the platform's default search paths
    pub fn new() -> Self {
        Self {
            search_paths: default_search_paths(),
        }
    }

    /// Create a loader that only searches the given directories
    pub fn with_search_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            search_paths: paths.into_iter().collect(),
        }
    }

    /// Append a search path
    pub fn add_search_path(&mut self, path: impl AsRef<Path>) {
        self.search_paths.push(path.as_ref().to_path_buf());
    }

    /// Put a search path ahead of all others
    pub fn prepend_search_path(&mut self, path: impl AsRef<Path>) {
        self.search_paths.insert(0, path.as_ref().to_path_buf());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find a library by name or path.
    ///
    /// `name` is only taken as a path when it contains a separator or ends
    /// in the platform suffix; an existing path wins over any search and is
    /// returned absolute so `dlopen` does not search for it again.
    pub fn find_library(&self, name: &str) -> Option<PathBuf> {
        if looks_like_path(name) {
            let path = Path::new(name);
            if path.is_file() {
                return std::fs::canonicalize(path).ok();
            }
        }

        let lib_name = library_filename(name);
        self.search_paths
            .iter()
            .map(|dir| dir.join(&lib_name))
            .find(|candidate| candidate.is_file())
            .map(|found| std::fs::canonicalize(&found).unwrap_or(found))
    }

    /// Find and load a library
    pub fn load(&self, name: &str) -> Result<DynamicLibrary, FfiError> {
        let path = self
            .find_library(name)
            .ok_or_else(|| FfiError::LibraryNotFound {
                name: name.to_string(),
                searched: self.search_paths.len(),
            })?;

        DynamicLibrary::load(path)
    }
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the default library search paths for this platform
fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Current directory
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    // Next to the running executable (cargo puts the cdylib there)
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir);
    }

    #[cfg(target_os = "linux")]
    {
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/usr/lib"));
        paths.push(PathBuf::from("/usr/lib64"));
        paths.push(PathBuf::from("/lib"));
        paths.push(PathBuf::from("/lib64"));
        paths.extend(env_paths("LD_LIBRARY_PATH"));
    }

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/opt/homebrew/lib"));
        paths.push(PathBuf::from("/usr/lib"));
        paths.extend(env_paths("DYLD_LIBRARY_PATH"));
    }

    #[cfg(target_os = "windows")]
    {
        paths.extend(env_paths("PATH"));
    }

    paths
}

fn env_paths(var: &str) -> Vec<PathBuf> {
    std::env::var_os(var)
        .map(|value| {
            std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn looks_like_path(name: &str) -> bool {
    name.contains('/')
        || name.contains(std::path::MAIN_SEPARATOR)
        || name.ends_with(std::env::consts::DLL_SUFFIX)
}

/// Construct the platform-specific library filename
pub fn library_filename(name: &str) -> String {
    let prefix = std::env::consts::DLL_PREFIX;
    let suffix = std::env::consts::DLL_SUFFIX;

    if name.ends_with(suffix) {
        name.to_string()
    } else if name.starts_with(prefix) {
        format!("{}{}", name, suffix)
    } else {
        format!("{}{}{}", prefix, name, suffix)
    }
}
