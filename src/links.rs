//! Link Classifier and Viewer URL Resolver
//!
//! Anchors are harvested from an unmodified parse of the page, so noise
//! removal never hides an attachment link.

use dom_query::{Document, Selection};
use tracing::debug;
use url::Url;

use crate::attachment::AttachmentFormat;
use crate::dom;
use crate::result::Link;
use crate::url_utils::{resolve, same_host};

/// Query parameter that inline document viewers use for the real file location.
const VIEWER_FILE_PARAM: &str = "file";

/// Anchors of one page split by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    /// Ordinary links in document order.
    pub content: Vec<Link>,
    /// Attachment URLs in discovery order, without duplicates.
    pub attachments: Vec<String>,
}

/// Recover the real document behind an inline-viewer URL.
///
/// Looks for a `file` query parameter, decodes it and resolves it against
/// `base`. Returns `None` when the parameter is absent or empty, or when the
/// value does not resolve.
///
/// # Examples
/// ```
/// use rs_pagesift::links::resolve_viewer_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.go.kr/board/").unwrap();
/// let viewer = Url::parse("https://example.go.kr/viewer.do?file=%2Fupload%2Fplan.hwp").unwrap();
/// assert_eq!(
///     resolve_viewer_url(&viewer, &base).map(String::from),
///     Some("https://example.go.kr/upload/plan.hwp".to_string())
/// );
/// ```
#[must_use]
pub fn resolve_viewer_url(url: &Url, base: &Url) -> Option<Url> {
    let file = url
        .query_pairs()
        .find(|(key, _)| key == VIEWER_FILE_PARAM)
        .map(|(_, value)| value.into_owned())?;
    let file = file.trim();
    if file.is_empty() {
        return None;
    }
    base.join(file).ok()
}

/// Visible text of an anchor, trimmed.
fn anchor_text(anchor: &Selection) -> String {
    dom::text_content(anchor).trim().to_string()
}

/// Partition every `a[href]` of `doc` into content links and attachments.
///
/// Order of checks per anchor:
/// 1. a viewer URL whose target is not yet collected becomes an attachment;
/// 2. a same-host href with a registered document extension is an attachment
///    unless already collected;
/// 3. everything else is a content link.
#[must_use]
pub fn classify_links(doc: &Document, base_url: &Url) -> ClassifiedLinks {
    let mut classified = ClassifiedLinks::default();

    for node in doc.select("a[href]").nodes() {
        let anchor = Selection::from(*node);
        let Some(href) = dom::get_attribute(&anchor, "href") else {
            continue;
        };
        let Some(absolute) = resolve(&href, base_url) else {
            debug!(href = %href, "unresolvable href skipped");
            continue;
        };

        if let Some(target) = resolve_viewer_url(&absolute, base_url).map(String::from) {
            if !classified.attachments.contains(&target) {
                debug!(viewer = %absolute, target = %target, "viewer link resolved");
                classified.attachments.push(target);
                continue;
            }
        }

        if AttachmentFormat::from_url(&href).is_ok()
            && same_host(&absolute, base_url)
            && !classified.attachments.iter().any(|a| a == absolute.as_str())
        {
            classified.attachments.push(String::from(absolute));
            continue;
        }

        classified
            .content
            .push(Link::new(String::from(absolute), anchor_text(&anchor)));
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.example.go.kr/board/view.do?id=7")
            .unwrap_or_else(|e| panic!("base url: {e}"))
    }

    fn classify(html: &str) -> ClassifiedLinks {
        classify_links(&Document::from(html), &base())
    }

    #[test]
    fn viewer_url_decodes_and_resolves_file_param() {
        let viewer = Url::parse(
            "https://www.example.go.kr/synap/viewer.do?file=https%3A%2F%2Fwww.example.go.kr%2Ffiles%2Fplan%20A.pdf&page=1",
        )
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            resolve_viewer_url(&viewer, &base()).map(String::from),
            Some("https://www.example.go.kr/files/plan%20A.pdf".to_string())
        );
    }

    #[test]
    fn viewer_url_resolves_relative_file_against_base() {
        let viewer = Url::parse("https://www.example.go.kr/viewer?file=..%2Fupload%2Fa.hwp")
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            resolve_viewer_url(&viewer, &base()).map(String::from),
            Some("https://www.example.go.kr/upload/a.hwp".to_string())
        );
    }

    #[test]
    fn viewer_url_without_file_param_is_none() {
        let plain = Url::parse("https://www.example.go.kr/viewer?doc=1&filename=a.pdf")
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(resolve_viewer_url(&plain, &base()).is_none());

        let empty = Url::parse("https://www.example.go.kr/viewer?file=")
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(resolve_viewer_url(&empty, &base()).is_none());
    }

    #[test]
    fn same_host_documents_are_attachments() {
        let links = classify(
            r#"<a href="/files/report.pdf">Report</a>
               <a href="data.XLSX">Data</a>
               <a href="/board/list.do">List of posts</a>"#,
        );

        assert_eq!(
            links.attachments,
            vec![
                "https://www.example.go.kr/files/report.pdf".to_string(),
                "https://www.example.go.kr/board/data.XLSX".to_string(),
            ]
        );
        assert_eq!(
            links.content,
            vec![Link::new("https://www.example.go.kr/board/list.do", "List of posts")]
        );
    }

    #[test]
    fn cross_domain_document_is_content_link() {
        let links = classify(r#"<a href="https://cdn.other.org/report.pdf"> External report </a>"#);

        assert!(links.attachments.is_empty());
        assert_eq!(
            links.content,
            vec![Link::new("https://cdn.other.org/report.pdf", "External report")]
        );
    }

    #[test]
    fn unsupported_extension_is_content_link() {
        let links = classify(r#"<a href="/files/archive.zip">Zip</a>"#);

        assert!(links.attachments.is_empty());
        assert_eq!(links.content.len(), 1);
    }

    #[test]
    fn duplicate_document_link_falls_through_to_content() {
        let links = classify(
            r#"<a href="/files/a.pdf">first</a>
               <a href="https://www.example.go.kr/files/a.pdf">again</a>"#,
        );

        assert_eq!(links.attachments, vec!["https://www.example.go.kr/files/a.pdf".to_string()]);
        assert_eq!(
            links.content,
            vec![Link::new("https://www.example.go.kr/files/a.pdf", "again")]
        );
    }

    #[test]
    fn viewer_link_collects_target_once() {
        let links = classify(
            r#"<a href="/viewer.do?file=%2Fupload%2Fnotice.hwp">Preview</a>
               <a href="/upload/notice.hwp">Download</a>
               <a href="/viewer.do?file=%2Fupload%2Fnotice.hwp">Preview again</a>"#,
        );

        assert_eq!(
            links.attachments,
            vec!["https://www.example.go.kr/upload/notice.hwp".to_string()]
        );
        let urls: Vec<&str> = links.content.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.example.go.kr/upload/notice.hwp",
                "https://www.example.go.kr/viewer.do?file=%2Fupload%2Fnotice.hwp",
            ]
        );
    }

    #[test]
    fn viewer_target_is_collected_whatever_its_extension() {
        let links = classify(r#"<a href="/viewer.do?file=%2Fdownload.do%3Fid%3D3">Preview</a>"#);

        assert_eq!(
            links.attachments,
            vec!["https://www.example.go.kr/download.do?id=3".to_string()]
        );
        assert!(links.content.is_empty());
    }

    #[test]
    fn anchors_without_href_are_ignored() {
        let links = classify(r#"<a name="top">Top</a><a href="">Self</a>"#);

        assert!(links.attachments.is_empty());
        assert_eq!(
            links.content,
            vec![Link::new("https://www.example.go.kr/board/view.do?id=7", "Self")]
        );
    }
}
