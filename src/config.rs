// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed harvest sources and defaults.
//!
//! The two corpora come from specific public sites with stable URLs; there is
//! no user-facing knob to retarget them. Harvest entry points still take the
//! URLs as parameters so tests can point them at a local mock server.

/// Index page listing every essay.
pub const ESSAY_INDEX_URL: &str = "https://www.paulgraham.com/articles.html";

/// Base URL the per-essay hrefs are resolved against.
pub const ESSAY_BASE_URL: &str = "https://www.paulgraham.com/";

/// Default directory for per-essay output files. Must already exist.
pub const ESSAY_OUT_DIR: &str = "paul_graham";

/// Base URL of the poem aggregation site.
pub const POEM_BASE_URL: &str = "https://www.antoloji.com";

/// Number of paginated index pages to walk.
pub const POEM_PAGE_COUNT: u32 = 6;

/// Default path for the combined poem corpus.
pub const POEM_OUT_PATH: &str = "yunus_emre.txt";

/// Per-request timeout for all harvest HTTP traffic.
pub const HTTP_TIMEOUT_MS: u64 = 30_000;

/// Build the URL of one poem index page (1-based page index).
pub fn poem_index_url(base_url: &str, page: u32) -> String {
    format!("{base_url}/yunus-emre/siirleri/ara-/sirala-/sayfa-{page}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_index_url() {
        assert_eq!(
            poem_index_url("https://www.antoloji.com", 3),
            "https://www.antoloji.com/yunus-emre/siirleri/ara-/sirala-/sayfa-3/"
        );
    }
}
