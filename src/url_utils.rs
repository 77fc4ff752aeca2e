//! URL Utility Functions
//!
//! Resolution of anchor hrefs against a page base, host comparison, path
//! extensions, file names and site identifiers.

use url::Url;

/// Parse a string as an absolute http(s) URL with a host.
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let url = Url::parse(url_str.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url)
}

/// Resolve `href` against `base`, the way a browser resolves an anchor.
///
/// Absolute hrefs (including `mailto:` or `javascript:`) are returned as
/// parsed; relative ones are joined onto the base.
#[must_use]
pub fn resolve(href: &str, base: &Url) -> Option<Url> {
    base.join(href.trim()).ok()
}

/// Hostname of a URL, lowercased; `None` for URLs without a host.
#[must_use]
pub fn host_of(url: &Url) -> Option<String> {
    url.host_str().map(str::to_ascii_lowercase)
}

/// Whether two URLs share the same host.
#[must_use]
pub fn same_host(a: &Url, b: &Url) -> bool {
    matches!((host_of(a), host_of(b)), (Some(x), Some(y)) if x == y)
}

/// Lowercased extension of the last path segment of a raw href, without the dot.
///
/// Query strings and fragments are ignored. Returns `None` when the last
/// segment has no dot or ends with one.
///
/// # Examples
/// ```
/// use rs_pagesift::url_utils::path_extension;
///
/// assert_eq!(path_extension("/files/Report.PDF?dl=1"), Some("pdf".to_string()));
/// assert_eq!(path_extension("https://example.com/board/view"), None);
/// ```
#[must_use]
pub fn path_extension(href: &str) -> Option<String> {
    let name = extract_filename(href);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Extract filename from a URL, stripping query parameters and fragments.
///
/// # Examples
/// ```
/// use rs_pagesift::url_utils::extract_filename;
///
/// assert_eq!(extract_filename("https://example.com/files/report.pdf"), "report.pdf");
/// assert_eq!(extract_filename("https://example.com/files/report.pdf?v=2"), "report.pdf");
/// assert_eq!(extract_filename("https://example.com/"), "");
/// ```
#[must_use]
pub fn extract_filename(url: &str) -> String {
    let url = url.trim();

    // Strip query parameters and fragment identifiers
    let without_query = url.split(['?', '#']).next().unwrap_or(url);

    // Keep only the path when the input is absolute
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => without_query,
    };

    let filename = path.rsplit('/').next().unwrap_or("").trim();

    if filename.is_empty() || filename == "." || filename == ".." {
        return String::new();
    }

    filename.to_string()
}

/// Derive a filesystem-safe site identifier from a URL's host.
///
/// `www.` is dropped. Hosts with three or more labels use `<second>_<first>`
/// (so `www.news.kyobo.com` becomes `kyobo_news`) unless the second label is a
/// registry label such as `co`, `go` or `or`, in which case only the first
/// label is used. Dashes become underscores.
///
/// # Examples
/// ```
/// use rs_pagesift::url_utils::site_identifier_from_url;
///
/// assert_eq!(site_identifier_from_url("https://www.kyobo.co.kr/"), "kyobo");
/// assert_eq!(site_identifier_from_url("https://news.example.com/a"), "example_news");
/// ```
#[must_use]
pub fn site_identifier_from_url(url_str: &str) -> String {
    let Some(host) = parse_url(url_str).and_then(|u| host_of(&u)) else {
        return "unknown_site".to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').collect();

    let identifier = match labels.as_slice() {
        [first, second, _, ..] if !matches!(*second, "co" | "go" | "or") => {
            format!("{second}_{first}")
        }
        [first, ..] => (*first).to_string(),
        [] => "unknown_site".to_string(),
    };

    identifier
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_url("https://example.com/board/list.do").unwrap_or_else(|| panic!("base URL"))
    }

    #[test]
    fn test_parse_url_accepts_http_only() {
        assert!(parse_url("https://example.com/path").is_some());
        assert!(parse_url("  http://example.com  ").is_some());
        assert!(parse_url("/relative/path").is_none());
        assert!(parse_url("ftp://example.com").is_none());
        assert!(parse_url("").is_none());
    }

    #[test]
    fn test_resolve_relative() {
        let base = base();
        assert_eq!(
            resolve("view.do?id=3", &base).map(String::from),
            Some("https://example.com/board/view.do?id=3".to_string())
        );
        assert_eq!(
            resolve("/files/a.pdf", &base).map(String::from),
            Some("https://example.com/files/a.pdf".to_string())
        );
        assert_eq!(
            resolve("../other/page.html", &base).map(String::from),
            Some("https://example.com/other/page.html".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_and_special() {
        let base = base();
        assert_eq!(
            resolve("https://other.org/x", &base).map(String::from),
            Some("https://other.org/x".to_string())
        );
        assert_eq!(
            resolve("mailto:desk@example.com", &base).map(String::from),
            Some("mailto:desk@example.com".to_string())
        );
    }

    #[test]
    fn test_same_host() {
        let a = base();
        let b = parse_url("https://EXAMPLE.com/files/a.pdf").unwrap_or_else(|| panic!("url"));
        let c = parse_url("https://cdn.example.com/files/a.pdf").unwrap_or_else(|| panic!("url"));
        assert!(same_host(&a, &b));
        assert!(!same_host(&a, &c));
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(path_extension("report.pdf"), Some("pdf".to_string()));
        assert_eq!(path_extension("/a/b/Data.XLSX#sheet"), Some("xlsx".to_string()));
        assert_eq!(path_extension("https://example.com/a.hwp?x=1.pdf"), Some("hwp".to_string()));
        assert_eq!(path_extension("https://example.com/"), None);
        assert_eq!(path_extension("https://example.com"), None);
        assert_eq!(path_extension("/download.do"), Some("do".to_string()));
        assert_eq!(path_extension("/.profile"), None);
        assert_eq!(path_extension("/file."), None);
    }

    #[test]
    fn test_extract_filename_edge_cases() {
        assert_eq!(extract_filename(""), "");
        assert_eq!(extract_filename("https://example.com"), "");
        assert_eq!(extract_filename("https://example.com/path/"), "");
        assert_eq!(extract_filename("https://example.com/.."), "");
        assert_eq!(extract_filename("/image.png?timestamp=12345"), "image.png");
        assert_eq!(extract_filename("my%20doc.pdf"), "my%20doc.pdf");
    }

    #[test]
    fn test_site_identifier_from_url() {
        assert_eq!(site_identifier_from_url("https://www.kyobo.co.kr/"), "kyobo");
        assert_eq!(site_identifier_from_url("https://www.mois.go.kr/"), "mois");
        assert_eq!(site_identifier_from_url("https://news.example.com/"), "example_news");
        assert_eq!(site_identifier_from_url("https://my-site.com/"), "my_site");
        assert_eq!(site_identifier_from_url("not a url"), "unknown_site");
    }
}
