//! Result types for extraction output.

use serde::{Deserialize, Serialize};

/// An ordinary (non-attachment) link found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL the anchor points to.
    pub url: String,

    /// Visible anchor text, trimmed.
    pub text: String,
}

impl Link {
    /// Create a new link.
    #[must_use]
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Result of extracting one page and its attachments.
///
/// Produced once per successful page fetch and handed to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The requested page URL.
    pub url: String,

    /// `<title>` text, or the URL when the page has none.
    pub title: String,

    /// Cleaned page text followed by one delimited block per attachment.
    pub main_text: String,

    /// Content links in document order.
    pub links: Vec<Link>,

    /// Attachment URLs in discovery order.
    pub attachments: Vec<String>,

    /// One line per attachment that could not be fetched or parsed.
    pub warnings: Vec<String>,

    /// Quality of the cleaned page text, `0.0..=1.0`. Attachments do not count.
    pub quality_score: f64,

    /// Wall-clock seconds spent on the page, attachments included.
    pub processing_time: f64,
}

/// Output of the synchronous HTML stage, before attachments are dispatched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// `<title>` text, or the URL when the page has none.
    pub title: String,

    /// Cleaned text of the content root.
    pub text: String,

    /// Content links in document order.
    pub links: Vec<Link>,

    /// Attachment URLs in discovery order, deduplicated.
    pub attachments: Vec<String>,

    /// [`content_quality`](crate::quality::content_quality) of `text`.
    pub quality_score: f64,
}
