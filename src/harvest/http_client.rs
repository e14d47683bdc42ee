// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Async HTTP client wrapping reqwest.
//!
//! Not a browser — just sequential GET requests with a timeout and a
//! redirect cap. Deliberately no retry or backoff: how a harvester reacts
//! to a failed fetch is per-harvester policy, decided at the call site.

use anyhow::Result;
use std::time::Duration;

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the harvesters.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let ua = concat!("quill/", env!("CARGO_PKG_VERSION"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET request.
    ///
    /// A non-2xx status is not an error here; callers inspect `status` and
    /// apply their own skip/abort policy. Transport failures (DNS, timeout,
    /// TLS) are errors.
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        let r = self.client.get(url).send().await?;
        let status = r.status().as_u16();
        let body = r.text().await.unwrap_or_default();

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}
