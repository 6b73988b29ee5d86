use serde::Serialize;
use thiserror::Error;

/// Failure to retrieve the cue file for a source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to read cue file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A cue whose timing line matched but whose image reference is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceError {
    #[error("timing line has no image reference")]
    MissingReference,

    #[error("bad #xywh= coordinates in '{reference}'")]
    BadCoordinates { reference: String },

    #[error("zero-sized #xywh= region in '{reference}'")]
    EmptyRegion { reference: String },
}

/// A recoverable problem found while parsing; the affected cue is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("line {line}: {error}")]
pub struct ParseWarning {
    /// 1-based line of the cue's timing line
    pub line: usize,
    pub error: ReferenceError,
}
