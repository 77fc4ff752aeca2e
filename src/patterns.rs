//! Compiled regex patterns, keyword tables and CSS selectors.
//!
//! Patterns are compiled once at first use via `LazyLock`. Keyword tables are
//! plain substring lists matched against lowercased id/class text.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Locator
// =============================================================================

/// Elements scored as content-root candidates.
pub const CANDIDATE_SELECTOR: &str = "div, article, section";

/// Id/class fragments that mark a block as probable main content.
pub const CONTENT_HINTS: &[&str] = &["content", "article", "post", "body", "main", "view"];

// =============================================================================
// Noise Filter
// =============================================================================

/// Elements that never contribute readable content (phase 1).
pub const STRUCTURAL_NOISE_SELECTOR: &str =
    "script, style, header, footer, nav, aside, form, button, iframe, figure";

/// Descendants of the content root inspected for noise keywords (phase 2).
pub const NOISE_REGION_SELECTOR: &str = "div, section, ul, li, table";

/// Id/class fragments that mark a region as boilerplate.
pub const NOISE_REGION_HINTS: &[&str] = &[
    "comment", "related", "share", "social", "extra", "footer", "header", "nav", "menu",
    "button", "author", "widget",
];

/// Phrases that disqualify a whole text line (case-sensitive substring match).
pub const NOISE_PHRASES: &[&str] = &[
    "다운로드",
    "뷰어",
    "첨부파일",
    "목록으로",
    "이전글",
    "다음글",
    "맨위로",
    "찾아오시는 길",
    "개인정보처리방침",
    "유용한 정보가 되었나요?",
    "Copyright",
    "All rights reserved",
    "Privacy Policy",
    "Back to top",
    "Back to list",
    "Previous post",
    "Next post",
    "Was this helpful",
];

/// A short leading label such as author, date or view count followed by a
/// separator. Korean labels accept whitespace as separator, English ones need
/// a colon so ordinary sentences starting with "Date" survive.
pub static METADATA_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:작성자|등록일|조회수|담당부서|키워드|분류)\s*[:：\s]|(?i:author|writer|date|posted|views|hits|department|keywords?|category)\s*[:：])",
    )
    .expect("METADATA_LABEL regex")
});

/// Three or more line breaks with only whitespace between them.
pub static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\n\s*){3,}").expect("BLANK_LINE_RUN regex")
});

// =============================================================================
// Content Quality
// =============================================================================

/// Words that mark informative institutional prose (description, overview,
/// status, results, plan, strategy...).
pub const INFO_KEYWORDS: &[&str] = &[
    "설명", "내용", "정보", "소개", "개요", "현황", "실적", "계획", "전략",
];
