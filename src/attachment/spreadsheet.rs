//! Spreadsheets (xlsx, xls) via `calamine`.
//!
//! Each sheet is rendered as a plain table: one line per row, cells padded to
//! the widest value of their column.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::{Error, Result};

/// Gap between rendered columns.
const COLUMN_GAP: &str = "  ";

fn render_sheet(range: &Range<Data>) -> String {
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            cells.join(COLUMN_GAP).trim_end().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every non-empty sheet as a text table, sheets separated by a blank line.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::Parse(format!("spreadsheet: {e}")))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| Error::Parse(format!("sheet {name}: {e}")))?;
        let table = render_sheet(&range);
        if !table.is_empty() {
            sheets.push(table);
        }
    }

    Ok(sheets.join("\n\n"))
}
