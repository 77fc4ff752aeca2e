//! Configuration options for page and attachment extraction.
//!
//! The `Options` struct controls network timeouts, scoring thresholds and
//! where unparsable attachments are archived.

use std::path::PathBuf;
use std::time::Duration;

/// Default browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration options for extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rs_pagesift::Options;
///
/// let options = Options {
///     attachment_timeout: Duration::from_secs(20),
///     stable_attachment_order: true,
///     ..Options::default()
/// };
/// assert_eq!(options.min_block_len, 100);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Total timeout for the primary page fetch.
    ///
    /// Default: 30 seconds
    pub page_timeout: Duration,

    /// Total timeout for each attachment download.
    ///
    /// Default: 60 seconds
    pub attachment_timeout: Duration,

    /// TCP connect timeout applied by the shared client.
    ///
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// User agent header.
    pub user_agent: String,

    /// Root directory of the failure archive. Each site gets a subdirectory.
    ///
    /// Default: `failed_attachments`
    pub archive_dir: PathBuf,

    /// Minimum visible text length (characters) for a block to be scored.
    ///
    /// Default: `100`
    pub min_block_len: usize,

    /// Minimum trimmed length (characters) for a text line to survive cleanup.
    ///
    /// Default: `10`
    pub min_line_len: usize,

    /// Score multiplier for blocks whose id/class hints at main content.
    ///
    /// Default: `1.5`
    pub content_hint_boost: f64,

    /// Merge attachment blocks in link discovery order instead of
    /// completion order.
    ///
    /// Default: `false`
    pub stable_attachment_order: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_secs(30),
            attachment_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            archive_dir: PathBuf::from("failed_attachments"),
            min_block_len: 100,
            min_line_len: 10,
            content_hint_boost: 1.5,
            stable_attachment_order: false,
        }
    }
}

impl Options {
    /// Build options from `PAGESIFT_*` environment variables on top of the defaults.
    ///
    /// Recognised variables: `PAGESIFT_PAGE_TIMEOUT`, `PAGESIFT_ATTACHMENT_TIMEOUT`
    /// (seconds), `PAGESIFT_USER_AGENT`, `PAGESIFT_ARCHIVE_DIR`,
    /// `PAGESIFT_STABLE_ORDER` (`1`/`true`/`yes`). Unset, empty or unparsable
    /// values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let secs = |key: &str| {
            get(key)
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|s| s.is_finite() && *s > 0.0)
                .map(Duration::from_secs_f64)
        };

        let mut options = Self::default();
        if let Some(timeout) = secs("PAGESIFT_PAGE_TIMEOUT") {
            options.page_timeout = timeout;
        }
        if let Some(timeout) = secs("PAGESIFT_ATTACHMENT_TIMEOUT") {
            options.attachment_timeout = timeout;
        }
        if let Some(agent) = get("PAGESIFT_USER_AGENT") {
            options.user_agent = agent;
        }
        if let Some(dir) = get("PAGESIFT_ARCHIVE_DIR") {
            options.archive_dir = PathBuf::from(dir);
        }
        if let Some(flag) = get("PAGESIFT_STABLE_ORDER") {
            options.stable_attachment_order =
                matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        options
    }
}
