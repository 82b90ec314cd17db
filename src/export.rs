//! Destinations for the text export.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::output::{EXPORT_MIME, export_file_name};

/// Writes `text` to `<dir>/<name>.txt`, creating `dir` if needed.
///
/// `name` is used as given.
pub fn write_local(dir: &str, name: &str, text: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {dir}"))?;

    let path = Path::new(dir).join(export_file_name(name));
    std::fs::write(&path, text)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = text.len(), "Export written");
    Ok(path)
}

/// Builds the upload body and object key, gzip-compressing when asked.
pub fn upload_payload(key: &str, text: &str, gzip: bool) -> Result<(Vec<u8>, String)> {
    if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes())?;
        Ok((encoder.finish()?, format!("{key}.gz")))
    } else {
        Ok((text.as_bytes().to_vec(), key.to_string()))
    }
}

/// Uploads the export text to an S3 bucket with `text/plain` content type.
///
/// Returns the object key actually written.
pub async fn upload_text_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    text: &str,
    gzip: bool,
) -> Result<String> {
    let (body, key) = upload_payload(key, text, gzip)?;
    debug!(bucket, key = %key, bytes = body.len(), "Uploading export");

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .body(body.into())
        .content_type(EXPORT_MIME);
    if gzip {
        request = request.content_encoding("gzip");
    }
    request
        .send()
        .await
        .with_context(|| format!("failed to upload s3://{bucket}/{key}"))?;

    info!(bucket, key = %key, "Export uploaded to S3");
    Ok(key)
}
