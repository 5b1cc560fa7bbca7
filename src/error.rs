// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single HTTP GET.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} timed out")]
    Timeout { url: String },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid value {value:?} for header {name}")]
    InvalidHeader { name: String, value: String },

    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Fatal errors while turning the sheet into a list of party names.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("party sheet unavailable at {url}: {source}")]
    SourceUnavailable {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("invalid party sheet URL {url}: {source}")]
    InvalidSourceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("party sheet is not valid UTF-8")]
    InvalidEncoding(#[source] std::string::FromUtf8Error),

    #[error("no party column found in sheet headers: {headers:?}")]
    ColumnNotFound { headers: Vec<String> },

    #[error("malformed CSV in party sheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors for one party's logo. These never abort the batch.
#[derive(Debug, Error)]
pub enum LogoError {
    #[error("{name:?} cannot be used as a file name")]
    InvalidFileName { name: String },

    #[error("invalid logo URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("fetch failed: {0}")]
    FetchFailed(#[source] FetchError),

    #[error("decode failed: {0}")]
    DecodeFailed(#[source] image::ImageError),

    #[error("image too small: {width}x{height}")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("PNG encode failed: {0}")]
    EncodeFailed(#[source] image::ImageError),

    #[error("writing {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Errors that stop a whole run before any logo is attempted.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("creating output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
