//! Shared fixtures for integration tests: in-memory documents and pages.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::io::Cursor;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Single-page PDF whose only content is `text`.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode page content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save pdf");
    out
}

/// DOCX with one paragraph per entry.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut out = Cursor::new(Vec::new());
    docx.build().pack(&mut out).expect("pack docx");
    out.into_inner()
}

/// Roughly `chars` characters of link-free prose.
pub fn prose(chars: usize) -> String {
    let sentence = "The ministry announced a new support programme for small businesses this week. ";
    sentence.repeat(chars / sentence.len() + 1)[..chars].trim().to_string()
}

/// A notice page whose main block holds `body` and whose file list holds `links`.
pub fn notice_page(title: &str, body: &str, links: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{title}</title></head>
<body>
  <header><a href="/">Home</a></header>
  <nav><a href="/board/list.do">Notices</a><a href="/about">About us</a></nav>
  <div id="contents" class="board-view">
    <p>{body}</p>
    <div class="file-area">{links}</div>
  </div>
  <footer>Copyright 2024 Example Agency. All rights reserved.</footer>
</body></html>"#
    )
}
