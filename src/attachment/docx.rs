//! Word documents via `docx-rs`.
//!
//! Only body-level paragraphs are read; tables, headers and footnotes are not.

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::error::{Error, Result};

/// Concatenated text of one paragraph's runs.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                _ => {}
            }
        }
    }
    text
}

/// Non-empty paragraph texts joined by newlines.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let docx = read_docx(bytes).map_err(|e| Error::Parse(format!("DOCX: {e}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}
