// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Corpus harvesting: fetch public pages, extract text, persist it.
//!
//! Two independent harvesters share nothing beyond the HTTP client: the
//! essay harvester writes one file per essay, the poem harvester writes a
//! single combined file. Both are strictly sequential — one request in
//! flight at a time.

pub mod essays;
pub mod extract;
pub mod http_client;
pub mod poems;
