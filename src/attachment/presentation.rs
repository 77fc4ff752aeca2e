//! PowerPoint decks (pptx) read straight from the OOXML container.
//!
//! Slides are `ppt/slides/slideN.xml` parts ordered by `N`. Within a slide
//! every shape (`p:sp`) with a text body contributes its paragraphs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Error, Result};

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const SLIDE_SUFFIX: &str = ".xml";

/// Slide number of a container entry, `None` for anything but a slide part.
fn slide_number(entry: &str) -> Option<u32> {
    entry
        .strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(SLIDE_SUFFIX)?
        .parse()
        .ok()
}

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Parse(format!("PPTX slide XML: {e}"))
}

/// Text of every text-bearing shape on one slide, in document order.
///
/// Paragraphs within a shape are joined by newlines; line breaks (`a:br`)
/// become newlines too.
fn shape_texts(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut shapes = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph: Option<String> = None;
    let mut in_shape = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sp" => {
                    in_shape = true;
                    paragraphs.clear();
                }
                b"p" if in_shape => paragraph = Some(String::new()),
                b"t" if paragraph.is_some() => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let (b"br", Some(p)) = (e.local_name().as_ref(), paragraph.as_mut()) {
                    p.push('\n');
                }
            }
            Event::Text(t) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(p) = paragraph.take() {
                        paragraphs.push(p);
                    }
                }
                b"sp" if in_shape => {
                    in_shape = false;
                    let text = paragraphs.join("\n");
                    if !text.trim().is_empty() {
                        shapes.push(text);
                    }
                    paragraphs.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}

/// Text of all shapes across all slides, one shape per chunk.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::Parse(format!("PPTX: {e}")))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
        .collect();
    slides.sort_unstable();

    let mut texts = Vec::new();
    for (_, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| Error::Parse(format!("PPTX {name}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| Error::Parse(format!("PPTX {name}: {e}")))?;
        texts.extend(shape_texts(&xml)?);
    }

    Ok(texts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn slide(shapes: &[&[&str]]) -> String {
        let body: String = shapes
            .iter()
            .map(|paragraphs| {
                let paragraphs: String = paragraphs
                    .iter()
                    .map(|text| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{text}</a:t></a:r></a:p>"))
                    .collect();
                format!(
                    "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Title\"/></p:nvSpPr>\
                     <p:txBody><a:bodyPr/>{paragraphs}</p:txBody></p:sp>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr>{body}
<p:pic><p:nvPicPr><p:cNvPr id="9" name="Picture"/></p:nvPicPr></p:pic>
</p:spTree></p:cSld></p:sld>"#
        )
    }

    fn build_pptx(entries: &[(&str, String)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default())
                .unwrap_or_else(|e| panic!("{e}"));
            zip.write_all(body.as_bytes()).unwrap_or_else(|e| panic!("{e}"));
        }
        zip.finish().unwrap_or_else(|e| panic!("{e}")).into_inner()
    }

    #[test]
    fn slide_numbers_parse_only_slide_parts() {
        assert_eq!(slide_number("ppt/slides/slide12.xml"), Some(12));
        assert_eq!(slide_number("ppt/slides/_rels/slide1.xml.rels"), None);
        assert_eq!(slide_number("ppt/slideLayouts/slideLayout1.xml"), None);
    }

    #[test]
    fn shapes_keep_paragraphs_and_skip_empty_bodies() {
        let xml = slide(&[&["Agenda", "Budget &amp; staffing"], &[""]]);
        let shapes = shape_texts(&xml).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(shapes, vec!["Agenda\nBudget & staffing".to_string()]);
    }

    #[test]
    fn slides_are_read_in_numeric_order() {
        let bytes = build_pptx(&[
            ("[Content_Types].xml", "<Types/>".to_string()),
            ("ppt/slides/slide10.xml", slide(&[&["Closing remarks"]])),
            ("ppt/slides/slide2.xml", slide(&[&["Second slide"]])),
            ("ppt/slides/slide1.xml", slide(&[&["Opening"], &["Subtitle text"]])),
        ]);

        let text = extract_text(&bytes).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(text, "Opening\nSubtitle text\nSecond slide\nClosing remarks");
    }

    #[test]
    fn invalid_utf8_slide_is_a_parse_error() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("ppt/slides/slide1.xml", SimpleFileOptions::default())
            .unwrap_or_else(|e| panic!("{e}"));
        zip.write_all(b"<p:sld>\xff\xfe</p:sld>").unwrap_or_else(|e| panic!("{e}"));
        let bytes = zip.finish().unwrap_or_else(|e| panic!("{e}")).into_inner();

        let err = extract_text(&bytes).err();
        assert!(matches!(&err, Some(Error::Parse(_))), "got {err:?}");
        assert!(err.is_some_and(|e| e.is_attachment_error()));
    }

    #[test]
    fn rejects_non_zip_bytes() {
        assert!(matches!(extract_text(b"not a deck"), Err(Error::Parse(_))));
    }
}
