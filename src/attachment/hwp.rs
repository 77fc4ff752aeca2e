//! HWP 5.x word-processor documents.
//!
//! An HWP file is a compound file. `/FileHeader` carries the signature and
//! property flags; the body lives in `/BodyText/Section0..N` streams, raw
//! deflate compressed when the header says so. Each section is a sequence of
//! tagged records; paragraph text sits in `PARA_TEXT` records as UTF-16LE
//! with inline control characters.

use std::char::REPLACEMENT_CHARACTER;
use std::io::{Cursor, Read};

use cfb::CompoundFile;
use flate2::read::DeflateDecoder;

use crate::error::{Error, Result};

const SIGNATURE: &[u8] = b"HWP Document File";
const FILE_HEADER: &str = "/FileHeader";
const SECTION_PREFIX: &str = "/BodyText/Section";

const FLAG_COMPRESSED: u32 = 0x01;
const FLAG_PASSWORD: u32 = 0x02;

/// `HWPTAG_BEGIN + 51`
const TAG_PARA_TEXT: u32 = 0x10 + 51;
const EXTENDED_SIZE: u32 = 0xFFF;

/// Inline and extended controls occupy this many code units, the control
/// code included.
const CONTROL_WIDTH: usize = 8;

fn parse_error(msg: impl Into<String>) -> Error {
    Error::Parse(format!("HWP: {}", msg.into()))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes: [u8; 4] = data.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Property flags from the 256-byte file header.
fn header_flags(header: &[u8]) -> Result<u32> {
    if !header.starts_with(SIGNATURE) {
        return Err(parse_error("missing HWP signature"));
    }
    read_u32(header, 36).ok_or_else(|| parse_error("truncated file header"))
}

/// Decode one `PARA_TEXT` payload.
///
/// Control codes 0, 10, 13 and 24..=31 are single code units; 10 and 13 end a
/// line and 30/31 are special spaces. Every other code below 32 starts an
/// eight-unit control, of which only the tab (9) is rendered.
fn decode_para_text(payload: &[u8]) -> String {
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let mut text = String::new();
    let mut pending: Vec<u16> = Vec::new();
    let flush = |pending: &mut Vec<u16>, text: &mut String| {
        text.extend(char::decode_utf16(pending.drain(..)).map(|c| c.unwrap_or(REPLACEMENT_CHARACTER)));
    };

    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if unit >= 32 {
            pending.push(unit);
            i += 1;
            continue;
        }

        flush(&mut pending, &mut text);
        match unit {
            10 | 13 => {
                text.push('\n');
                i += 1;
            }
            30 | 31 => {
                text.push(' ');
                i += 1;
            }
            0 | 24..=29 => i += 1,
            9 => {
                text.push('\t');
                i += CONTROL_WIDTH;
            }
            _ => i += CONTROL_WIDTH,
        }
    }
    flush(&mut pending, &mut text);

    text
}

/// Paragraph texts of one decompressed section stream.
fn section_text(data: &[u8]) -> Result<Vec<String>> {
    let mut paragraphs = Vec::new();
    let mut pos = 0;

    while pos + 4 <= data.len() {
        let header = read_u32(data, pos).ok_or_else(|| parse_error("truncated record"))?;
        let tag = header & 0x3FF;
        let mut size = header >> 20;
        pos += 4;
        if size == EXTENDED_SIZE {
            size = read_u32(data, pos).ok_or_else(|| parse_error("truncated record size"))?;
            pos += 4;
        }

        let size = size as usize;
        let payload = data
            .get(pos..pos + size)
            .ok_or_else(|| parse_error("record exceeds section stream"))?;
        if tag == TAG_PARA_TEXT {
            paragraphs.push(decode_para_text(payload));
        }
        pos += size;
    }

    Ok(paragraphs)
}

/// Body text of every section, one paragraph per line.
///
/// Fails when the document is password protected or contains no text at all.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut file = CompoundFile::open(Cursor::new(bytes))
        .map_err(|e| parse_error(format!("not a compound file: {e}")))?;

    let mut header = Vec::new();
    file.open_stream(FILE_HEADER)
        .and_then(|mut stream| stream.read_to_end(&mut header))
        .map_err(|e| parse_error(format!("{FILE_HEADER}: {e}")))?;
    let flags = header_flags(&header)?;
    if flags & FLAG_PASSWORD != 0 {
        return Err(parse_error("document is password protected"));
    }
    let compressed = flags & FLAG_COMPRESSED != 0;

    let mut lines = Vec::new();
    for index in 0.. {
        let path = format!("{SECTION_PREFIX}{index}");
        if !file.exists(&path) {
            break;
        }

        let mut raw = Vec::new();
        file.open_stream(&path)
            .and_then(|mut stream| stream.read_to_end(&mut raw))
            .map_err(|e| parse_error(format!("{path}: {e}")))?;
        let data = if compressed {
            let mut inflated = Vec::new();
            DeflateDecoder::new(raw.as_slice())
                .read_to_end(&mut inflated)
                .map_err(|e| parse_error(format!("{path}: {e}")))?;
            inflated
        } else {
            raw
        };

        for paragraph in section_text(&data)? {
            lines.extend(
                paragraph
                    .split('\n')
                    .map(str::trim_end)
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string),
            );
        }
    }

    let text = lines.join("\n");
    if text.trim().is_empty() {
        return Err(parse_error("extracted body text is empty"));
    }
    Ok(text)
}
