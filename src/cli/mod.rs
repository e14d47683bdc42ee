// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the Quill binary.

pub mod essays_cmd;
pub mod output;
pub mod poems_cmd;
