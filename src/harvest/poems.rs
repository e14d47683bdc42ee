// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Poem harvester: one combined output file.
//!
//! Walks a fixed number of paginated index pages, deduplicates poem links
//! into a set, fetches every unique poem, and writes all paragraph lines to
//! a single newline-joined file. A failed per-poem fetch is reported and
//! skipped; index pages and structure mismatches are fatal.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use url::Url;

use crate::config::poem_index_url;

use super::extract;
use super::http_client::HttpClient;

/// Outcome of one poem harvest run.
#[derive(Debug, Clone, Serialize)]
pub struct PoemSummary {
    /// Index pages walked.
    pub pages: u32,
    /// Unique poem URLs after deduplication.
    pub unique_links: usize,
    /// Poems fetched and included in the corpus.
    pub fetched: usize,
    /// Poems skipped on a non-success response.
    pub skipped: usize,
    /// Lines in the combined output.
    pub lines: usize,
}

/// Collect the deduplicated set of absolute poem URLs from `pages`
/// consecutive index pages.
///
/// The set is ordered, so a harvest run visits poems in a stable order.
pub async fn collect_poem_links(
    client: &HttpClient,
    base_url: &str,
    pages: u32,
) -> Result<BTreeSet<String>> {
    let base = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;
    let mut links = BTreeSet::new();

    for page in 1..=pages {
        let index_url = poem_index_url(base_url, page);
        let index = client
            .get(&index_url)
            .await
            .with_context(|| format!("fetching poem index {index_url}"))?;
        if !index.is_success() {
            anyhow::bail!("poem index {index_url} returned HTTP {}", index.status);
        }

        for href in extract::poem_links(&index.body)? {
            let resolved = base
                .join(&href)
                .with_context(|| format!("unresolvable poem href {href}"))?;
            links.insert(resolved.to_string());
        }
    }

    tracing::info!("poem index: {} unique links across {pages} pages", links.len());
    Ok(links)
}

/// Harvest every unique poem into one newline-joined file at `out_path`.
pub async fn harvest_poems(
    client: &HttpClient,
    base_url: &str,
    pages: u32,
    out_path: &Path,
) -> Result<PoemSummary> {
    let links = collect_poem_links(client, base_url, pages).await?;

    let pb = progress_bar(links.len() as u64);
    let mut lines: Vec<String> = Vec::new();
    let mut fetched = 0usize;
    let mut skipped = 0usize;

    for poem_url in &links {
        pb.inc(1);

        let resp = client
            .get(poem_url)
            .await
            .with_context(|| format!("fetching poem {poem_url}"))?;
        if !resp.is_success() {
            tracing::warn!("skipping {poem_url}: HTTP {}", resp.status);
            skipped += 1;
            continue;
        }

        let paragraphs = extract::poem_paragraphs(&resp.body)
            .with_context(|| format!("extracting poem text from {poem_url}"))?;
        lines.extend(paragraphs);
        fetched += 1;
    }
    pb.finish_and_clear();

    std::fs::write(out_path, lines.join("\n"))
        .with_context(|| format!("writing {}", out_path.display()))?;

    tracing::info!(
        "poem harvest done: {fetched} fetched, {skipped} skipped, {} lines",
        lines.len()
    );
    Ok(PoemSummary {
        pages,
        unique_links: links.len(),
        fetched,
        skipped,
        lines: lines.len(),
    })
}

fn progress_bar(len: u64) -> ProgressBar {
    if crate::cli::output::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} poems")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
