//! Synchronous HTML stage of page extraction.
//!
//! The page is parsed twice: one tree stays untouched for link harvesting,
//! the other is cleaned in place for text extraction. Everything here is
//! CPU-bound and `!Send` (DOM nodes), so async callers run it on the
//! blocking pool.

use url::Url;

use crate::dom::{self, Document};
use crate::links::classify_links;
use crate::locator::find_content_root;
use crate::noise;
use crate::options::Options;
use crate::quality::content_quality;
use crate::result::PageContent;

/// Trimmed `<title>` text, `None` when missing or blank.
fn page_title(doc: &Document) -> Option<String> {
    let title = doc.select("title").first();
    if !title.exists() {
        return None;
    }
    let text = dom::text_content(&title).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Extract title, cleaned main text, content links and attachment URLs from
/// an HTML string. No network access.
///
/// `url` is the page address (title fallback); `base_url` resolves relative
/// hrefs and defines which host counts as same-origin for attachments.
///
/// # Examples
///
/// ```rust
/// use rs_pagesift::{extract_html, Options};
/// use url::Url;
///
/// let html = r#"<html><head><title>Notice</title></head><body>
///   <div class="board-view"><p>The district office will close for renovation from June 3 until
///   June 14, and services move to the community centre next door during that period.</p>
///   <a href="/files/schedule.pdf">Schedule</a></div></body></html>"#;
/// let base = Url::parse("https://www.example.go.kr/").unwrap();
///
/// let page = extract_html(html, "https://www.example.go.kr/notice/1", &base, &Options::default());
/// assert_eq!(page.title, "Notice");
/// assert_eq!(page.attachments, vec!["https://www.example.go.kr/files/schedule.pdf"]);
/// ```
#[must_use]
pub fn extract_html(html: &str, url: &str, base_url: &Url, options: &Options) -> PageContent {
    let link_doc = dom::parse(html);
    let links = classify_links(&link_doc, base_url);

    let text_doc = dom::parse(html);
    let title = page_title(&text_doc).unwrap_or_else(|| url.to_string());

    noise::strip_structural(&text_doc);
    let root = find_content_root(&text_doc, options);
    let text = noise::clean_content_root(&root, options);

    PageContent {
        title,
        quality_score: content_quality(&text),
        text,
        links: links.content,
        attachments: links.attachments,
    }
}
