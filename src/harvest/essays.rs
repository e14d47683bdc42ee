// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Essay harvester: one output file per essay.
//!
//! Walks the essay index, follows every link in the third table, and writes
//! each essay's text block to `<out_dir>/<slug>.txt`. A per-essay fetch that
//! comes back non-2xx is skipped without operator-visible output; the index
//! fetch and any structure mismatch are fatal.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use super::extract;
use super::http_client::HttpClient;

/// Outcome of one essay harvest run.
#[derive(Debug, Clone, Serialize)]
pub struct EssaySummary {
    /// Links found in the index table.
    pub links_found: usize,
    /// Essays fetched and written.
    pub written: usize,
    /// Links skipped on a non-success response.
    pub skipped: usize,
}

/// Harvest every essay linked from `index_url` into `out_dir`.
///
/// `out_dir` must already exist; existing files are overwritten.
pub async fn harvest_essays(
    client: &HttpClient,
    index_url: &str,
    base_url: &str,
    out_dir: &Path,
) -> Result<EssaySummary> {
    let index = client
        .get(index_url)
        .await
        .with_context(|| format!("fetching essay index {index_url}"))?;
    if !index.is_success() {
        anyhow::bail!("essay index {index_url} returned HTTP {}", index.status);
    }

    let links = extract::essay_links(&index.body)?;
    tracing::info!("essay index: {} links", links.len());

    let base = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;

    let mut written = 0usize;
    let mut skipped = 0usize;

    for href in &links {
        let Ok(url) = base.join(href) else {
            tracing::debug!("unresolvable href {href}, skipping");
            skipped += 1;
            continue;
        };

        let resp = client
            .get(url.as_str())
            .await
            .with_context(|| format!("fetching essay {url}"))?;
        if !resp.is_success() {
            tracing::debug!("essay {url} returned HTTP {}, skipping", resp.status);
            skipped += 1;
            continue;
        }

        let text = extract::essay_body(&resp.body)
            .with_context(|| format!("extracting essay text from {url}"))?;

        let path = out_dir.join(format!("{}.txt", slug(href)));
        std::fs::write(&path, &text)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("wrote {}", path.display());
        written += 1;
    }

    tracing::info!("essay harvest done: {written} written, {skipped} skipped");
    Ok(EssaySummary {
        links_found: links.len(),
        written,
        skipped,
    })
}

/// Output name for an essay href: the final path segment with everything
/// from the first `.` stripped (`"avg.html"` → `"avg"`).
fn slug(href: &str) -> &str {
    let segment = href.rsplit('/').next().unwrap_or(href);
    segment.split('.').next().unwrap_or(segment)
}
