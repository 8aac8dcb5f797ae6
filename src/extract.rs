// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Client for the metadata-extraction service ("AI annotation")
//!
//! The service reads a paper (by arXiv link or uploaded PDF) and answers with
//! a record in the catalogue schema, possibly wrapped in `{"metadata": ...}`.
//! Extraction output is a draft: the session loads it for the contributor to
//! review, never for direct submission.

use anyhow::{bail, Context, Result};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::info;

const USER_AGENT: &str = concat!("fihrist/", env!("CARGO_PKG_VERSION"));

fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch a record document from a plain URL (the load-by-URL path)
pub fn fetch_record(url: &str) -> Result<Value> {
    info!("Fetching record from {url}");
    let response = client()?
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {url}"))?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().unwrap_or_default();
        bail!("Fetching {url} failed: {status}: {detail}");
    }

    response
        .json()
        .with_context(|| format!("{url} did not return valid JSON"))
}

/// Ask the service to extract metadata from a link it can read itself
pub fn from_link(service: &str, link: &str) -> Result<Value> {
    info!("Requesting extraction for {link}");
    let response = client()?
        .post(service)
        .form(&[("link", link)])
        .send()
        .with_context(|| format!("Failed to reach the annotation service at {service}"))?;

    read_record_response(response)
}

/// Ask the service to extract metadata from an uploaded PDF
pub fn from_pdf(service: &str, file_name: &str, bytes: Vec<u8>) -> Result<Value> {
    info!("Uploading {file_name} for extraction");
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str("application/pdf")
        .context("Failed to build PDF upload")?;
    let form = Form::new().part("file", part);

    let response = client()?
        .post(service)
        .multipart(form)
        .send()
        .with_context(|| format!("Failed to reach the annotation service at {service}"))?;

    read_record_response(response)
}

/// Extract metadata from a paper URL: arXiv links go to the service as-is,
/// anything else must be a direct PDF link which is downloaded and uploaded
pub fn from_paper_url(service: &str, paper_url: &str) -> Result<Value> {
    if is_arxiv_link(paper_url) {
        return from_link(service, paper_url);
    }

    let response = client()?
        .get(paper_url)
        .send()
        .with_context(|| format!("Failed to download {paper_url}"))?;
    if !response.status().is_success() {
        bail!("Downloading {paper_url} failed: {}", response.status());
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.starts_with("application/pdf") {
        bail!(
            "Cannot retrieve a PDF from {paper_url}; make sure it is a direct link to a valid PDF"
        );
    }

    let name = pdf_file_name(paper_url);
    let bytes = response
        .bytes()
        .with_context(|| format!("Failed to read {paper_url}"))?
        .to_vec();
    from_pdf(service, &name, bytes)
}

fn read_record_response(response: reqwest::blocking::Response) -> Result<Value> {
    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().unwrap_or_default();
        bail!("Annotation service answered {status}: {detail}");
    }

    response
        .json()
        .context("Annotation service did not return valid JSON")
}

/// Whether a paper URL points at arXiv
#[must_use]
pub fn is_arxiv_link(url: &str) -> bool {
    url.contains("arxiv")
}

/// File name a downloaded PDF is uploaded under
#[must_use]
pub fn pdf_file_name(url: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("paper.pdf")
        .to_string()
}
