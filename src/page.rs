//! Page Extractor
//!
//! Drives one page through fetch, HTML extraction and attachment dispatch:
//!
//! ```text
//! Fetching -> (non-200 / non-HTML => None) -> Parsed -> ContentSelected
//!          -> Cleaned -> AttachmentsDispatched -> Merged
//! ```
//!
//! Any error aborts that page only and yields `None`; nothing partial is
//! returned.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::archive::FailureArchive;
use crate::attachment::{self, AttachmentOutcome};
use crate::encoding::decode_page;
use crate::error::{Error, Result};
use crate::extract::extract_html;
use crate::options::Options;
use crate::result::ExtractionResult;
use crate::session::Session;
use crate::url_utils::parse_url;

/// Extracts pages and their attachments over a shared [`Session`].
///
/// The extractor never closes the session on its own; call
/// [`close_session`](Self::close_session) (or hold a
/// [`SessionGuard`](crate::SessionGuard)) when the crawl ends.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    session: Arc<Session>,
    archive: FailureArchive,
    options: Options,
}

impl PageExtractor {
    /// Extractor with its own session built from `options`.
    pub fn new(options: Options) -> Result<Self> {
        let session = Arc::new(Session::new(&options)?);
        Ok(Self::with_session(session, options))
    }

    /// Extractor over a caller-owned session.
    #[must_use]
    pub fn with_session(session: Arc<Session>, options: Options) -> Self {
        Self {
            archive: FailureArchive::new(options.archive_dir.clone()),
            session,
            options,
        }
    }

    /// The shared session.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The failure archive attachments are saved to.
    #[must_use]
    pub fn archive(&self) -> &FailureArchive {
        &self.archive
    }

    /// Extract one page. Failures are logged and reported as `None`.
    pub async fn extract(
        &self,
        url: &str,
        base_url: &str,
        site_identifier: &str,
    ) -> Option<ExtractionResult> {
        match self.try_extract(url, base_url, site_identifier).await {
            Ok(result) => Some(result),
            Err(e @ (Error::Fetch { .. } | Error::NotHtml { .. })) => {
                warn!(url = %url, error = %e, "page skipped");
                None
            }
            Err(e) => {
                error!(url = %url, error = ?e, "page extraction failed");
                None
            }
        }
    }

    /// Extract one page, returning the reason on failure.
    pub async fn try_extract(
        &self,
        url: &str,
        base_url: &str,
        site_identifier: &str,
    ) -> Result<ExtractionResult> {
        let started = Instant::now();
        let base = parse_url(base_url)
            .ok_or_else(|| Error::Unexpected(format!("invalid base URL: {base_url}")))?;

        let response = self.session.get(url, self.options.page_timeout).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.to_ascii_lowercase().contains("text/html") {
            return Err(Error::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.bytes().await?;
        let html = decode_page(&body, Some(&content_type));

        let page_url = url.to_string();
        let options = self.options.clone();
        let page = tokio::task::spawn_blocking(move || extract_html(&html, &page_url, &base, &options))
            .await
            .map_err(|e| Error::Unexpected(format!("HTML extraction aborted: {e}")))?;
        debug!(
            url = %url,
            chars = page.text.chars().count(),
            links = page.links.len(),
            quality = page.quality_score,
            attachments = page.attachments.len(),
            "page content extracted"
        );

        let outcomes = self
            .dispatch_attachments(&page.attachments, site_identifier)
            .await;

        let mut main_text = page.text;
        let mut warnings = Vec::new();
        for outcome in outcomes {
            main_text.push_str(&outcome.block);
            warnings.extend(outcome.warning);
        }

        Ok(ExtractionResult {
            url: url.to_string(),
            title: page.title,
            main_text,
            links: page.links,
            attachments: page.attachments,
            warnings,
            quality_score: page.quality_score,
            processing_time: started.elapsed().as_secs_f64(),
        })
    }

    /// Fetch and parse all attachments concurrently.
    ///
    /// Outcomes arrive in completion order, or in discovery order when
    /// `stable_attachment_order` is set.
    async fn dispatch_attachments(
        &self,
        urls: &[String],
        site_identifier: &str,
    ) -> Vec<AttachmentOutcome> {
        let mut pending: FuturesUnordered<_> = urls
            .iter()
            .enumerate()
            .map(|(index, url)| {
                attachment::dispatch(
                    &self.session,
                    &self.archive,
                    site_identifier,
                    index,
                    url.clone(),
                    self.options.attachment_timeout,
                )
            })
            .collect();

        let mut outcomes = Vec::with_capacity(urls.len());
        while let Some(outcome) = pending.next().await {
            outcomes.push(outcome);
        }

        if self.options.stable_attachment_order {
            outcomes.sort_by_key(|o| o.index);
        }
        outcomes
    }

    /// Release the shared HTTP client. Safe to call more than once.
    pub fn close_session(&self) {
        self.session.close();
    }
}
