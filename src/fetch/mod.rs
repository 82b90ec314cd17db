//! Loading a read log from a local path or over HTTP.

mod basic;
pub mod auth;

pub use auth::ApiKey;
pub use basic::BasicClient;

use anyhow::{Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::{Request, Response};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use tracing::{debug, warn};

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Fetches `url` and returns the response body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Opens `source` as a line reader.
///
/// Sources starting with `http` are downloaded, with `token` sent as a bearer
/// credential when given. Anything else is read from disk without loading it
/// whole. A `.gz` suffix is decompressed on the fly.
#[tracing::instrument(skip(token), fields(source = %source))]
pub async fn open_source(source: &str, token: Option<&str>) -> Result<Box<dyn BufRead + Send>> {
    let raw: Box<dyn Read + Send> = if source.starts_with("http") {
        let fetch_start = std::time::Instant::now();
        let bytes = match token {
            Some(token) => fetch_bytes(&ApiKey::bearer(BasicClient::new(), token)?, source).await,
            None => fetch_bytes(&BasicClient::new(), source).await,
        }
        .with_context(|| format!("failed to fetch {source}"))?;

        let elapsed = fetch_start.elapsed();
        if elapsed.as_secs() > 15 {
            warn!(elapsed_secs = elapsed.as_secs(), "Read log fetch was slow");
        }
        debug!(bytes = bytes.len(), "Read log downloaded");
        Box::new(Cursor::new(bytes))
    } else {
        Box::new(File::open(source).with_context(|| format!("failed to open {source}"))?)
    };

    Ok(decompress_if_gz(source, raw))
}

/// Wraps `raw` in a gzip decoder when `source` names a `.gz` file.
pub fn decompress_if_gz(source: &str, raw: Box<dyn Read + Send>) -> Box<dyn BufRead + Send> {
    if source.ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(raw)))
    } else {
        Box::new(BufReader::new(raw))
    }
}
