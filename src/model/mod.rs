// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model components for downstream text-generation experiments.
//!
//! Library-only: nothing here is wired to the CLI. The harvesters produce
//! the corpora; what trains on them lives with the experiment.

pub mod rnn;

pub use rnn::{ModelError, Rnn, RnnConfig};
