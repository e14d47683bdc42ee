// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quill runtime library — corpus harvesting and a variable-depth recurrent cell.
//!
//! This library crate exposes the core modules for integration testing.

pub mod cli;
pub mod config;
pub mod harvest;
pub mod model;
