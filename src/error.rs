//! Error types for gdoc_to_docx.

use std::io;
use thiserror::Error;

/// Result type alias for conversion and packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a whole document (or a whole batch).
///
/// Nothing inside the HTML translation engine produces these; a failed image
/// is a [`FetchError`] that ends up as a warning instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The source page could not be retrieved at all.
    #[error("failed to fetch {url}: {source}")]
    PageFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The source page answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status}")]
    PageStatus { url: String, status: u16 },

    /// The blocking HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// A URL pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The URL does not point at a Google Doc or Drive folder.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O error when writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error while building a zip container (.docx or batch archive).
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Why a single image could not be embedded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with something other than 200.
    #[error("HTTP {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Bytes arrived but are not an image format we can embed.
    #[error("unrecognized image data: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}
