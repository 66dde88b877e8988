// SPDX-License-Identifier: MPL-2.0
//! Build script for packaging settings.
//!
//! Selects the build mode from the `ESTATE_ENV` flag so the public base path
//! is fixed at compile time, and re-embeds static assets when they change.

fn main() {
    println!("cargo:rerun-if-env-changed=ESTATE_ENV");
    println!("cargo:rerun-if-changed=static/map.json");

    let mode = match std::env::var("ESTATE_ENV") {
        Ok(value) if value.trim().eq_ignore_ascii_case("production") => "production",
        _ => "development",
    };
    println!("cargo:rustc-env=ESTATE_BUILD_MODE={mode}");
}
