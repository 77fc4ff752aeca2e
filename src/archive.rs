//! Failure Archive
//!
//! Attachments that were downloaded but could not be parsed are written to
//! `<root>/<site>/<unix_ts>_<basename>` together with a JSON sidecar
//! (`<file>.meta.json`) describing the failure. The archive is best-effort:
//! its own I/O errors are logged and swallowed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::Result;
use crate::url_utils::extract_filename;

/// Sidecar suffix appended to the saved file name.
pub const SIDECAR_SUFFIX: &str = ".meta.json";

/// Metadata written next to an archived attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// URL the bytes were downloaded from.
    pub original_url: String,
    /// Where the raw bytes were written.
    pub saved_path: String,
    /// Parser error message.
    pub failure_reason: String,
    /// UTC time of the failure, `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
}

/// On-disk store for unparsable attachments, partitioned by site.
#[derive(Debug, Clone)]
pub struct FailureArchive {
    root: PathBuf,
}

/// Replace path separators and characters that are invalid in file names.
fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

impl FailureArchive {
    /// Archive rooted at `root`. Nothing is created until the first failure.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the archive.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the failures of one site.
    #[must_use]
    pub fn site_dir(&self, site_identifier: &str) -> PathBuf {
        let site = sanitize_component(site_identifier.trim());
        let site = match site.as_str() {
            "" | "." | ".." => "unknown_site".to_string(),
            _ => site,
        };
        self.root.join(site)
    }

    /// Persist `bytes` and their sidecar. Returns the written record, or
    /// `None` when the archive itself failed (already logged).
    pub fn save(
        &self,
        url: &str,
        bytes: &[u8],
        reason: &str,
        site_identifier: &str,
    ) -> Option<FailureRecord> {
        match self.try_save(url, bytes, reason, site_identifier, Utc::now()) {
            Ok(record) => {
                warn!(
                    url = %url,
                    saved_path = %record.saved_path,
                    reason = %reason,
                    "attachment parse failed, raw bytes archived"
                );
                Some(record)
            }
            Err(e) => {
                error!(url = %url, error = %e, "could not archive failed attachment");
                None
            }
        }
    }

    /// [`save`](Self::save) on the blocking pool, so large writes do not
    /// stall the runtime thread driving other downloads.
    pub async fn save_blocking(
        &self,
        url: String,
        bytes: Arc<[u8]>,
        reason: String,
        site_identifier: String,
    ) -> Option<FailureRecord> {
        let archive = self.clone();
        let log_url = url.clone();
        match tokio::task::spawn_blocking(move || archive.save(&url, &bytes, &reason, &site_identifier))
            .await
        {
            Ok(record) => record,
            Err(e) => {
                error!(url = %log_url, error = %e, "archive task aborted");
                None
            }
        }
    }

    fn try_save(
        &self,
        url: &str,
        bytes: &[u8],
        reason: &str,
        site_identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<FailureRecord> {
        let dir = self.site_dir(site_identifier);
        fs::create_dir_all(&dir)?;

        let ts = now.timestamp();
        let basename = sanitize_component(&extract_filename(url));
        let basename = if basename.is_empty() {
            format!("{ts}.attachment")
        } else {
            basename
        };
        let file_path = dir.join(format!("{ts}_{basename}"));
        fs::write(&file_path, bytes)?;

        let record = FailureRecord {
            original_url: url.to_string(),
            saved_path: file_path.display().to_string(),
            failure_reason: reason.to_string(),
            timestamp: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        };

        let mut meta_path = file_path.into_os_string();
        meta_path.push(SIDECAR_SUFFIX);
        let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::from)?;
        fs::write(PathBuf::from(meta_path), json)?;

        Ok(record)
    }
}
