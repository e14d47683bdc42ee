// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! `quill essays` — harvest the essay corpus into a directory.

use std::path::Path;

use anyhow::Result;

use crate::config;
use crate::harvest::essays::harvest_essays;
use crate::harvest::http_client::HttpClient;

use super::output;

/// Run the essays command.
pub async fn run(out_dir: &str) -> Result<()> {
    let client = HttpClient::new(config::HTTP_TIMEOUT_MS);
    let summary = harvest_essays(
        &client,
        config::ESSAY_INDEX_URL,
        config::ESSAY_BASE_URL,
        Path::new(out_dir),
    )
    .await?;

    if output::is_json() {
        output::print_json(&summary);
    } else if !output::is_quiet() {
        println!(
            "  {} essays written to {out_dir}/ ({} skipped, {} links)",
            summary.written, summary.skipped, summary.links_found
        );
    }
    Ok(())
}
