//! Character encoding detection and transcoding for fetched pages.
//!
//! Institutional sites still serve legacy encodings (EUC-KR, Shift_JIS,
//! windows-1252). The charset is taken from the HTTP `Content-Type` header
//! first, then from meta tags in the document head, and the bytes are decoded
//! to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match the `charset=` parameter of a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Detect character encoding from a `Content-Type` header and the HTML bytes.
///
/// Order of precedence:
/// 1. `charset=` parameter of the header
/// 2. `<meta charset>` or `<meta http-equiv="Content-Type">` in the first 1024 bytes
/// 3. UTF-8
///
/// Unknown labels are skipped.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type
        .and_then(header_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    extract_meta_charset(&head_str)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Extract the charset parameter from a `Content-Type` header value.
fn header_charset(content_type: &str) -> Option<String> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract charset from a meta tag.
fn extract_meta_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode page bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than causing errors. A
/// byte-order mark overrides the detected encoding.
///
/// # Examples
///
/// ```
/// use rs_pagesift::encoding::decode_page;
///
/// let html = b"<html><body>Caf\xE9</body></html>";
/// let text = decode_page(html, Some("text/html; charset=ISO-8859-1"));
/// assert!(text.contains("Café"));
/// ```
#[must_use]
pub fn decode_page(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(html, content_type);
    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}
