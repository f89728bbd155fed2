//! Blocklist source acquisition.
//!
//! Reads raw bytes from a file, a URL, stdin or an inline string, undoes gzip
//! compression when present and decodes the result as UTF-8. Anything that
//! goes wrong here is reported as a [`SourceError`] before the parser runs;
//! the parser itself only ever sees decoded text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use flate2::read::MultiGzDecoder;

/// Leading bytes of every gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Errors that can occur while acquiring blocklist text
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {origin}: {source}")]
    Io { origin: String, source: io::Error },

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Download of {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Download of {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decompress gzip data from {origin}: {source}")]
    Decompress { origin: String, source: io::Error },

    #[error("Invalid file encoding in {origin}: not UTF-8 (bad byte at offset {offset})")]
    Encoding { origin: String, offset: usize },
}

/// Settings for downloading blocklists
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
        }
    }
}

/// User agent sent with blocklist downloads
pub fn default_user_agent() -> String {
    format!("peer-bouncer/{}", env!("CARGO_PKG_VERSION"))
}

/// Where blocklist text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlocklistSource {
    File(PathBuf),
    Url(String),
    Stdin,
    /// Text that is already in memory, e.g. pasted into a form
    Text { name: String, content: String },
}

impl BlocklistSource {
    /// Interpret a command-line argument: `-` is stdin, `http(s)://` a URL, anything else a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            BlocklistSource::Stdin
        } else if is_http_url(arg) {
            BlocklistSource::Url(arg.to_string())
        } else {
            BlocklistSource::File(PathBuf::from(arg))
        }
    }

    /// Human-readable origin used in logs and error messages
    pub fn describe(&self) -> String {
        match self {
            BlocklistSource::File(path) => path.display().to_string(),
            BlocklistSource::Url(url) => url.clone(),
            BlocklistSource::Stdin => "<stdin>".to_string(),
            BlocklistSource::Text { name, .. } => name.clone(),
        }
    }

    /// File name or URL path, used for `.gz` detection
    fn name_hint(&self) -> Option<String> {
        match self {
            BlocklistSource::File(path) => Some(path.to_string_lossy().into_owned()),
            BlocklistSource::Url(url) => reqwest::Url::parse(url).ok().map(|u| u.path().to_string()),
            BlocklistSource::Stdin | BlocklistSource::Text { .. } => None,
        }
    }

    /// Read the raw, possibly compressed, bytes of this source
    pub fn read_bytes(&self, options: &FetchOptions) -> Result<Vec<u8>, SourceError> {
        match self {
            BlocklistSource::File(path) => fs::read(path).map_err(|source| SourceError::Io {
                origin: self.describe(),
                source,
            }),
            BlocklistSource::Url(url) => download(url, options),
            BlocklistSource::Stdin => {
                let mut buffer = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buffer)
                    .map_err(|source| SourceError::Io {
                        origin: self.describe(),
                        source,
                    })?;
                Ok(buffer)
            }
            BlocklistSource::Text { content, .. } => Ok(content.as_bytes().to_vec()),
        }
    }
}

/// Check whether `text` is an absolute http or https URL (scheme case-insensitive)
pub fn is_http_url(text: &str) -> bool {
    reqwest::Url::parse(text).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Fetch a URL with the blocking HTTP client
fn download(url: &str, options: &FetchOptions) -> Result<Vec<u8>, SourceError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| SourceError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SourceError::InvalidUrl {
            url: url.to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    log::info!("Downloading blocklist from {}", url);

    let http_error = |source| SourceError::Http {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()
        .map_err(http_error)?;

    let response = client.get(parsed).send().map_err(http_error)?;
    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.bytes().map_err(http_error)?;
    log::debug!("Received {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

/// Check whether data is gzip, by `.gz` name or by magic bytes
pub fn is_gzip(name_hint: Option<&str>, bytes: &[u8]) -> bool {
    let gz_name = name_hint.is_some_and(|name| name.to_ascii_lowercase().ends_with(".gz"));
    gz_name || bytes.starts_with(&GZIP_MAGIC)
}

/// Decompress a (possibly multi-member) gzip stream
pub fn gunzip(bytes: &[u8], origin: &str) -> Result<Vec<u8>, SourceError> {
    let mut decompressed = Vec::new();
    MultiGzDecoder::new(bytes)
        .read_to_end(&mut decompressed)
        .map_err(|source| SourceError::Decompress {
            origin: origin.to_string(),
            source,
        })?;
    Ok(decompressed)
}

/// Decode UTF-8 text, dropping a leading byte order mark
pub fn decode_utf8(bytes: Vec<u8>, origin: &str) -> Result<String, SourceError> {
    let text = String::from_utf8(bytes).map_err(|e| SourceError::Encoding {
        origin: origin.to_string(),
        offset: e.utf8_error().valid_up_to(),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Turn raw source bytes into blocklist text
pub fn decode_blocklist(
    bytes: Vec<u8>,
    name_hint: Option<&str>,
    origin: &str,
) -> Result<String, SourceError> {
    let bytes = if is_gzip(name_hint, &bytes) {
        log::debug!("Detected gzip data in {}", origin);
        gunzip(&bytes, origin)?
    } else {
        bytes
    };
    decode_utf8(bytes, origin)
}

/// Acquire and decode the full text of a blocklist source
pub fn load_text(source: &BlocklistSource, options: &FetchOptions) -> Result<String, SourceError> {
    if let BlocklistSource::Text { content, .. } = source {
        return Ok(content.clone());
    }

    let origin = source.describe();
    let bytes = source.read_bytes(options)?;
    decode_blocklist(bytes, source.name_hint().as_deref(), &origin)
}
