//! Retrieval of the maintenance-due payload from the service API or disk.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::debug;

/// Issues a `GET` for `url` and returns the response body.
///
/// Non-2xx responses are errors; the body is not inspected.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let mut req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();

    debug!(url, bytes = bytes.len(), "Payload fetched");
    Ok(bytes)
}

/// Loads a payload from an `http(s)` URL or a local file path.
#[tracing::instrument(skip(client))]
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("fetching {source}"))
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("reading {source}"))
    }
}
