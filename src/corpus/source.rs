//! Play text source: HTTP download with an on-disk cache.

use log::{debug, info, warn};
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// The full text of "Hamlet" on MIT's Shakespeare site.
pub const DEFAULT_SOURCE_URL: &str = "http://shakespeare.mit.edu/hamlet/full.html";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("response is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Download a page and decode it as UTF-8.
pub fn download(url: &str) -> Result<String, SourceError> {
    info!("downloading {}", url);
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    let body = response.bytes()?;
    Ok(String::from_utf8(body.to_vec())?)
}

/// Read `cache_path`, downloading `url` into it first if it does not exist.
pub fn load_cached_or_download(url: &str, cache_path: &Path) -> Result<String, SourceError> {
    match std::fs::read_to_string(cache_path) {
        Ok(text) => {
            debug!("using cached text from {}", cache_path.display());
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("did not find {}, downloading...", cache_path.display());
            let text = download(url)?;
            if let Some(parent) = cache_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(cache_path, &text)?;
            info!("saved HTML file as {}", cache_path.display());
            Ok(text)
        }
        Err(e) => Err(e.into()),
    }
}
