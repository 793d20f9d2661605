//! Build script for the Hellow headers
//!
//! Generates `include/hellow.h` (C) and `include/hellow.hxx` (C++, namespace
//! `hellow`) from the `#[no_mangle]` exports using cbindgen so C, C++, Go
//! (cgo) and Python (ctypes) clients can link against the cdylib.

use std::env;
use std::path::{Path, PathBuf};

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let include_dir = crate_dir.join("include");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/context/");

    let c_header = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("HELLOW_H")
        .with_no_includes()
        .with_sys_include("stdint.h")
        .generate();
    write_header(c_header, &include_dir.join("hellow.h"));

    let cxx_header = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::Cxx)
        .with_namespace("hellow")
        .with_include_guard("HELLOW_HXX")
        .with_no_includes()
        .with_sys_include("cstdint")
        .generate();
    write_header(cxx_header, &include_dir.join("hellow.hxx"));
}

fn write_header(bindings: Result<cbindgen::Bindings, cbindgen::Error>, path: &Path) {
    match bindings {
        Ok(bindings) => {
            bindings.write_to_file(path);
        }
        Err(e) => {
            println!(
                "cargo:warning=Unable to generate {}: {}",
                path.display(),
                e
            );
        }
    }
}
