//! Attachment Dispatcher
//!
//! Maps a file extension to one of a closed set of formats, downloads the
//! attachment, parses it on the blocking pool and renders a delimited text
//! block for the page's main text.
//!
//! # Module Structure
//!
//! - `pdf`: page text via `lopdf`
//! - `docx`: paragraphs via `docx-rs`
//! - `spreadsheet`: xlsx/xls sheets via `calamine`
//! - `presentation`: pptx slides via `zip` + `quick-xml`
//! - `hwp`: HWP 5 body text via `cfb` + `flate2`
//!
//! Failures never propagate: a failed attachment becomes a placeholder block
//! plus a warning, and downloaded bytes go to the [`FailureArchive`].

pub mod docx;
pub mod hwp;
pub mod pdf;
pub mod presentation;
pub mod spreadsheet;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::archive::FailureArchive;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::url_utils::{extract_filename, path_extension};

/// Supported attachment formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentFormat {
    /// `.pdf`
    Pdf,
    /// `.docx`
    Docx,
    /// `.xlsx`, `.xls`
    Spreadsheet,
    /// `.pptx`
    Presentation,
    /// `.hwp`
    Hwp,
}

impl AttachmentFormat {
    /// Registered extensions, lowercase and without the dot.
    pub const EXTENSIONS: &'static [(&'static str, AttachmentFormat)] = &[
        ("pdf", Self::Pdf),
        ("docx", Self::Docx),
        ("xlsx", Self::Spreadsheet),
        ("xls", Self::Spreadsheet),
        ("pptx", Self::Presentation),
        ("hwp", Self::Hwp),
    ];

    /// Format for an extension (case-insensitive, leading dot optional).
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::EXTENSIONS
            .iter()
            .find(|(known, _)| *known == normalized)
            .map(|(_, format)| *format)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))
    }

    /// Format for the last path segment of `url`.
    pub fn from_url(url: &str) -> Result<Self> {
        let ext = path_extension(url).ok_or_else(|| Error::UnsupportedFormat(url.to_string()))?;
        Self::from_extension(&ext)
    }

    /// Extract text with this format's parser. Output is not yet checked for
    /// emptiness; see [`parse_attachment`].
    pub fn parse(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Pdf => pdf::extract_text(bytes),
            Self::Docx => docx::extract_text(bytes),
            Self::Spreadsheet => spreadsheet::extract_text(bytes),
            Self::Presentation => presentation::extract_text(bytes),
            Self::Hwp => hwp::extract_text(bytes),
        }
    }
}

impl fmt::Display for AttachmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "PPTX",
            Self::Hwp => "HWP",
        };
        f.write_str(name)
    }
}

/// Parse one document. Whitespace-only output counts as a failure.
///
/// # Examples
/// ```
/// use rs_pagesift::{parse_attachment, AttachmentFormat, Error};
///
/// let err = parse_attachment(AttachmentFormat::Pdf, b"not a pdf").unwrap_err();
/// assert!(matches!(err, Error::Parse(_)));
/// ```
pub fn parse_attachment(format: AttachmentFormat, bytes: &[u8]) -> Result<String> {
    let text = format.parse(bytes).map_err(|e| {
        if e.is_attachment_error() {
            e
        } else {
            Error::Parse(format!("{format}: {e}"))
        }
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Parse(format!("{format} parser returned no text")));
    }
    Ok(text.to_string())
}

/// One attachment while it is being dispatched.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    /// Absolute attachment URL.
    pub url: String,
    /// Lowercased extension of the URL path, if any.
    pub file_extension: Option<String>,
    /// Downloaded body; `None` until the fetch succeeds.
    pub raw_bytes: Option<Arc<[u8]>>,
}

impl AttachmentRecord {
    /// Record for `url` with its extension taken from the URL path.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            file_extension: path_extension(&url),
            url,
            raw_bytes: None,
        }
    }

    /// File name shown in the text block markers.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = extract_filename(&self.url);
        if name.is_empty() {
            self.url.clone()
        } else {
            name
        }
    }

    fn format(&self) -> Result<AttachmentFormat> {
        let ext = self
            .file_extension
            .as_deref()
            .ok_or_else(|| Error::UnsupportedFormat(self.url.clone()))?;
        AttachmentFormat::from_extension(ext)
    }
}

/// Block appended to the main text for a parsed attachment.
#[must_use]
pub fn success_block(name: &str, text: &str) -> String {
    format!("\n\n--- [Attachment start: {name}] ---\n{text}\n--- [Attachment end] ---\n")
}

/// Placeholder appended to the main text for a failed attachment.
#[must_use]
pub fn failure_block(name: &str) -> String {
    format!("\n\n--- [Attachment failed: {name}] ---\n")
}

/// Result of dispatching one attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentOutcome {
    /// Position of the attachment in discovery order.
    pub index: usize,
    /// Success block or failure placeholder.
    pub block: String,
    /// Failure description, `None` on success.
    pub warning: Option<String>,
}

async fn fetch_bytes(session: &Session, url: &str, timeout: Duration) -> Result<Arc<[u8]>> {
    let response = session
        .get(url, timeout)
        .await
        .map_err(|e| Error::AttachmentFetch(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::AttachmentFetch(format!("{url}: HTTP {}", status.as_u16())));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::AttachmentFetch(format!("{url}: {e}")))?;
    Ok(Arc::from(body.as_ref()))
}

/// Run the parser on the blocking pool; a panicking parser is a parse error.
async fn parse_blocking(format: AttachmentFormat, bytes: Arc<[u8]>) -> Result<String> {
    tokio::task::spawn_blocking(move || parse_attachment(format, &bytes))
        .await
        .map_err(|e| Error::Parse(format!("{format} parser aborted: {e}")))?
}

/// Fetch, parse and render one attachment.
///
/// Bytes that were downloaded but could not be parsed are handed to
/// `archive` under `site_identifier`. Nothing here fails the page.
pub async fn dispatch(
    session: &Session,
    archive: &FailureArchive,
    site_identifier: &str,
    index: usize,
    url: String,
    timeout: Duration,
) -> AttachmentOutcome {
    let mut record = AttachmentRecord::new(url);
    let name = record.display_name();

    let result = async {
        let format = record.format()?;
        let bytes = fetch_bytes(session, &record.url, timeout).await?;
        record.raw_bytes = Some(Arc::clone(&bytes));
        let text = parse_blocking(format, bytes).await?;
        Ok::<_, Error>((format, text))
    }
    .await;

    match result {
        Ok((format, text)) => {
            info!(
                url = %record.url,
                format = %format,
                chars = text.chars().count(),
                "attachment text extracted"
            );
            AttachmentOutcome {
                index,
                block: success_block(&name, &text),
                warning: None,
            }
        }
        Err(e) => {
            error!(url = %record.url, error = %e, "attachment processing failed");
            if let Some(bytes) = record.raw_bytes.take() {
                archive
                    .save_blocking(record.url.clone(), bytes, e.to_string(), site_identifier.to_string())
                    .await;
            }
            AttachmentOutcome {
                index,
                block: failure_block(&name),
                warning: Some(format!("{name}: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_registry() {
        assert_eq!(AttachmentFormat::from_extension("pdf").ok(), Some(AttachmentFormat::Pdf));
        assert_eq!(AttachmentFormat::from_extension(".XLS").ok(), Some(AttachmentFormat::Spreadsheet));
        assert_eq!(AttachmentFormat::from_extension("xlsx").ok(), Some(AttachmentFormat::Spreadsheet));
        assert_eq!(AttachmentFormat::from_extension("pptx").ok(), Some(AttachmentFormat::Presentation));
        assert_eq!(AttachmentFormat::from_extension("hwp").ok(), Some(AttachmentFormat::Hwp));
        assert_eq!(AttachmentFormat::from_extension("docx").ok(), Some(AttachmentFormat::Docx));
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        for ext in ["doc", "ppt", "hwpx", "zip", ""] {
            assert!(
                matches!(AttachmentFormat::from_extension(ext), Err(Error::UnsupportedFormat(_))),
                "{ext} should be rejected"
            );
        }
        assert!(matches!(
            AttachmentFormat::from_url("https://a.test/download.do?id=3"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn record_derives_extension_and_name() {
        let record = AttachmentRecord::new("https://a.test/files/Plan.HWP?v=2");
        assert_eq!(record.file_extension.as_deref(), Some("hwp"));
        assert_eq!(record.display_name(), "Plan.HWP");
        assert!(record.raw_bytes.is_none());

        let bare = AttachmentRecord::new("https://a.test/");
        assert_eq!(bare.display_name(), "https://a.test/");
    }

    #[test]
    fn block_markers() {
        assert_eq!(
            success_block("a.pdf", "body"),
            "\n\n--- [Attachment start: a.pdf] ---\nbody\n--- [Attachment end] ---\n"
        );
        assert_eq!(failure_block("a.pdf"), "\n\n--- [Attachment failed: a.pdf] ---\n");
    }

    #[test]
    fn parse_attachment_trims_and_dispatches() {
        let bytes = hwp::tests::sample_hwp(&["  첫 문단  ", "둘째 문단"]);
        let text = parse_attachment(AttachmentFormat::Hwp, &bytes).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(text, "첫 문단\n둘째 문단");
    }

    #[test]
    fn parse_attachment_rejects_textless_documents() {
        let bytes = pdf::tests::build_pdf(&[""]);
        assert!(matches!(
            parse_attachment(AttachmentFormat::Pdf, &bytes),
            Err(Error::Parse(_))
        ));
    }

    #[tokio::test]
    async fn unsupported_url_fails_without_fetching() {
        let session = Session::from_client(reqwest::Client::new());
        session.close();
        let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let archive = FailureArchive::new(tmp.path());

        let outcome = dispatch(
            &session,
            &archive,
            "site",
            4,
            "https://a.test/board/download.do".to_string(),
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(outcome.index, 4);
        assert_eq!(outcome.block, failure_block("download.do"));
        let warning = outcome.warning.unwrap_or_default();
        assert!(warning.contains("Unsupported attachment format"), "{warning}");
        assert!(!tmp.path().join("site").exists());
    }
}
