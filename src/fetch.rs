use crate::error::FetchError;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Retrieves the raw text of a cue file
pub trait CueFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Reads cue files from the local filesystem. Accepts plain paths and
/// `file://` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFetcher;

impl CueFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        debug!(path, "reading cue file");
        let bytes = std::fs::read(Path::new(path)).map_err(|source| FetchError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Fetches cue files with a single blocking GET
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Request {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl CueFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "fetching cue file");
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(request_error)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Dispatches to HTTP for `http(s)://` sources and to the filesystem otherwise
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            http: HttpFetcher::new(timeout)?,
            file: FileFetcher,
        })
    }
}

pub fn is_remote(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl CueFetcher for SourceFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if is_remote(url) {
            self.http.fetch(url)
        } else {
            self.file.fetch(url)
        }
    }
}
