//! PDF text via `lopdf`.

use lopdf::Document;
use tracing::debug;

use crate::error::{Error, Result};

/// Text of every page that yields any, in page order, one page per chunk.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes).map_err(|e| Error::Parse(format!("PDF: {e}")))?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) if !text.trim().is_empty() => pages.push(text.trim_end().to_string()),
            Ok(_) => {}
            Err(e) => debug!(page = page_number, error = %e, "PDF page without extractable text"),
        }
    }

    Ok(pages.join("\n"))
}
