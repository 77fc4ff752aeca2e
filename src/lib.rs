//! # rs-pagesift
//!
//! Main-content extraction for institutional and news web pages, including
//! the documents they link to.
//!
//! A page is fetched, its main content region is located by text density,
//! boilerplate is stripped, and every same-origin document attachment (PDF,
//! DOCX, XLSX/XLS, PPTX, HWP) is downloaded and parsed concurrently. The
//! result is one clean text payload plus the page's ordinary links.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rs_pagesift::{Options, PageExtractor};
//!
//! # async fn run() -> rs_pagesift::Result<()> {
//! let extractor = PageExtractor::new(Options::default())?;
//!
//! if let Some(result) = extractor
//!     .extract("https://www.example.go.kr/board/view.do?id=42", "https://www.example.go.kr/", "example")
//!     .await
//! {
//!     println!("{}: {} chars", result.title, result.main_text.chars().count());
//! }
//!
//! extractor.close_session();
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! - **Candidate Locator** (`locator`): scores `div`/`article`/`section` blocks
//!   by text length and quadratic link-density penalty
//! - **Noise Filter** (`noise`): structural strip, keyword region strip, line cleanup
//! - **Link Classifier** (`links`): content links vs. attachments, viewer URL recovery
//! - **Attachment Dispatcher** (`attachment`): per-format parsers on the blocking pool
//! - **Failure Archive** (`archive`): raw bytes + JSON sidecar for unparsable files
//! - **Page Extractor** (`page`): fetch, orchestrate, merge

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// URL utilities for resolution, host comparison and site identifiers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Content root selection by text density.
pub mod locator;

/// Structural, region and line-level noise removal.
pub mod noise;

/// Content quality heuristic.
pub mod quality;

/// Anchor classification and inline-viewer URL resolution.
pub mod links;

/// Attachment formats, parsers and dispatch.
pub mod attachment;

/// On-disk archive of attachments that failed to parse.
pub mod archive;

/// Shared, explicitly closed HTTP session.
pub mod session;

/// Page fetch and orchestration.
pub mod page;

// Public API - re-exports
pub use archive::{FailureArchive, FailureRecord};
pub use attachment::{parse_attachment, AttachmentFormat, AttachmentRecord};
pub use error::{Error, Result};
pub use extract::extract_html;
pub use options::Options;
pub use page::PageExtractor;
pub use quality::content_quality;
pub use result::{ExtractionResult, Link, PageContent};
pub use session::{Session, SessionGuard};
pub use url_utils::site_identifier_from_url;

/// Like [`extract_html`], for raw page bytes in any declared encoding.
///
/// The charset comes from `content_type` when given, else from the
/// document's meta tags, else UTF-8.
///
/// # Example
///
/// ```rust
/// use rs_pagesift::{extract_html_bytes, Options};
/// use url::Url;
///
/// // "공지" (notice) in EUC-KR
/// let html = b"<html><head><title>\xB0\xF8\xC1\xF6</title></head><body></body></html>";
/// let base = Url::parse("https://www.example.go.kr/").unwrap();
/// let page = extract_html_bytes(html, Some("text/html; charset=euc-kr"), "https://www.example.go.kr/n/1", &base, &Options::default());
/// assert_eq!(page.title, "공지");
/// ```
#[must_use]
pub fn extract_html_bytes(
    html: &[u8],
    content_type: Option<&str>,
    url: &str,
    base_url: &url::Url,
    options: &Options,
) -> PageContent {
    let html = encoding::decode_page(html, content_type);
    extract_html(&html, url, base_url, options)
}
