//! HTTP flat-file preimage source.
//!
//! The receipt store is a plain static host. Each identity has one JSON file
//! at `<base>/<address>_<chain code>.json` with (at least) a `preimage` field
//! holding a hex string. One GET per resolution, no retries: if the store is
//! down, the user finds out immediately.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::{FetchError, Preimage, PreimageSource};
use crate::identity::CanonicalAddress;

/// Largest flat-file body accepted. Real files are a few hundred bytes.
pub const MAX_FLAT_FILE_BYTES: usize = 64 * 1024;

/// Build the flat-file URL for an address and chain code.
///
/// A trailing slash on `base_url` is tolerated and not doubled.
///
/// ```
/// use adh_protocol::preimage::flat_file_url;
///
/// assert_eq!(
///     flat_file_url("https://files.example.com/", "123456789012345678", 14443),
///     "https://files.example.com/123456789012345678_14443.json"
/// );
/// ```
pub fn flat_file_url(base_url: &str, address: &str, chain_code: u16) -> String {
    format!(
        "{}/{}_{}.json",
        base_url.trim_end_matches('/'),
        address,
        chain_code
    )
}

/// Fetches preimages from the flat-file host over HTTP(S).
#[derive(Clone)]
pub struct HttpPreimageSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPreimageSource {
    /// Create a source for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    /// The URL that [`fetch`](PreimageSource::fetch) would request.
    pub fn url_for(&self, address: &CanonicalAddress, chain_code: u16) -> String {
        flat_file_url(&self.base_url, address.as_str(), chain_code)
    }
}

#[async_trait]
impl PreimageSource for HttpPreimageSource {
    async fn fetch(
        &self,
        address: &CanonicalAddress,
        chain_code: u16,
    ) -> Result<Preimage, FetchError> {
        let url = self.url_for(address, chain_code);
        tracing::debug!(url = %url, "fetching flat file");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "flat file fetch rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = read_capped(response, &url).await?;
        let preimage = parse_flat_file(&url, &body)?;
        tracing::debug!(bytes = preimage.len(), "preimage fetched");
        Ok(preimage)
    }
}

/// Read the body, giving up once it passes [`MAX_FLAT_FILE_BYTES`].
///
/// A declared `Content-Length` over the limit is rejected before reading.
/// Chunked bodies are counted as they arrive.
async fn read_capped(mut response: reqwest::Response, url: &str) -> Result<Vec<u8>, FetchError> {
    let too_large = |size: u64| FetchError::MalformedBody {
        url: url.to_string(),
        reason: format!("body is {size} bytes or more (limit {MAX_FLAT_FILE_BYTES})"),
    };

    if let Some(declared) = response.content_length() {
        if declared > MAX_FLAT_FILE_BYTES as u64 {
            return Err(too_large(declared));
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })? {
        if body.len() + chunk.len() > MAX_FLAT_FILE_BYTES {
            return Err(too_large((body.len() + chunk.len()) as u64));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Pull the `preimage` field out of a flat-file body.
fn parse_flat_file(url: &str, body: &[u8]) -> Result<Preimage, FetchError> {
    let malformed = |reason: String| FetchError::MalformedBody {
        url: url.to_string(),
        reason,
    };

    let json: Value = serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;
    let field = json
        .get("preimage")
        .ok_or_else(|| malformed("missing 'preimage' field".to_string()))?;
    let text = field
        .as_str()
        .ok_or_else(|| malformed("'preimage' is not a string".to_string()))?;

    Preimage::from_hex(text)
}
