// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Output mode helpers shared by all subcommands.
//!
//! Global flags are stashed in environment variables by `main` so any module
//! can check them without threading a context struct through every call.

use serde::Serialize;

/// True when `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("QUILL_QUIET").is_ok()
}

/// True when `--json` was passed.
pub fn is_json() -> bool {
    std::env::var("QUILL_JSON").is_ok()
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to serialize output: {e}"),
    }
}
