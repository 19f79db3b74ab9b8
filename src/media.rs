//! Media ingestion: uploaded files become self-describing `data:` strings.
//!
//! Files in a batch are read concurrently, but the batch commits as a
//! whole: every outstanding read must land before anything is returned, so
//! callers never observe a partial, order-dependent result.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encodes every file into a `data:<mime>;base64,<payload>` string, in
/// input order. Either the whole batch succeeds or the call fails.
pub async fn encode_batch(paths: &[PathBuf]) -> Result<Vec<String>> {
    let mut handles = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.clone();
        handles.push(tokio::spawn(async move { encode_file(&path).await }));
    }

    let mut encoded = Vec::with_capacity(handles.len());
    for handle in handles {
        encoded.push(handle.await.map_err(|err| anyhow!("encode task panicked: {err}"))??);
    }
    Ok(encoded)
}

pub async fn encode_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read media file {}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        STANDARD.encode(&bytes)
    ))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}
