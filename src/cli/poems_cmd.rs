// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! `quill poems` — harvest the poem corpus into one combined file.

use std::path::Path;

use anyhow::Result;

use crate::config;
use crate::harvest::http_client::HttpClient;
use crate::harvest::poems::harvest_poems;

use super::output;

/// Run the poems command.
pub async fn run(out: &str) -> Result<()> {
    let client = HttpClient::new(config::HTTP_TIMEOUT_MS);
    let summary = harvest_poems(
        &client,
        config::POEM_BASE_URL,
        config::POEM_PAGE_COUNT,
        Path::new(out),
    )
    .await?;

    if output::is_json() {
        output::print_json(&summary);
    } else if !output::is_quiet() {
        println!(
            "  {} poems ({} lines) written to {out} ({} skipped of {} unique)",
            summary.fetched, summary.lines, summary.skipped, summary.unique_links
        );
    }
    Ok(())
}
