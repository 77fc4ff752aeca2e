//! Error types for rs-pagesift.
//!
//! Page-level errors abort a single extraction; attachment-level errors are
//! contained by the dispatcher and never fail the page.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page answered with a non-success status.
    #[error("Page fetch failed with HTTP {status}: {url}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The page answered with something other than HTML.
    #[error("Not an HTML page ({content_type}): {url}")]
    NotHtml {
        /// Requested URL.
        url: String,
        /// Content type reported by the server.
        content_type: String,
    },

    /// Network, timeout or status failure while downloading an attachment.
    #[error("Attachment fetch failed: {0}")]
    AttachmentFetch(String),

    /// A format parser failed or produced no text.
    #[error("Attachment parsing failed: {0}")]
    Parse(String),

    /// The file extension has no registered parser.
    #[error("Unsupported attachment format: {0}")]
    UnsupportedFormat(String),

    /// The shared session was closed before the request was issued.
    #[error("HTTP session is closed")]
    SessionClosed,

    /// Transport-level HTTP failure on the page fetch.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else, e.g. a worker task that could not be joined.
    #[error("Unexpected extraction failure: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether this error belongs to the per-attachment class.
    #[must_use]
    pub fn is_attachment_error(&self) -> bool {
        matches!(
            self,
            Self::AttachmentFetch(_) | Self::Parse(_) | Self::UnsupportedFormat(_)
        )
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
