//! Build Script for Risk Analytics
//!
//! Handles coverage instrumentation and build-time configuration.
//!
//! Coverage exclusions are handled via:
//! 1. `#[cfg(not(coverage))]` attributes on code
//! 2. `LLVM_PROFILE_FILE` environment variable
//! 3. `cargo-llvm-cov` ignore comments

use std::env;

fn main() {
    // Set profile file pattern for coverage runs
    #[cfg(coverage)]
    {
        println!("cargo:rustc-env=LLVM_PROFILE_FILE=coverage-%p-%m.profraw");
    }

    println!("cargo:rerun-if-changed=build.rs");

    // Usage: #[cfg(coverage)] or #[cfg(not(coverage))]
    if env::var("CARGO_LLVM_COV").is_ok()
        || env::var("LLVM_PROFILE_FILE").is_ok()
        || env::var("RUSTFLAGS")
            .map(|f| f.contains("instrument-coverage"))
            .unwrap_or(false)
    {
        println!("cargo:rustc-cfg=coverage");
    }
}
