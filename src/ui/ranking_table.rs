//! Rankings table rendering
//!
//! Lays out ranking rows with a ratatui `Table` in an off-screen buffer sized
//! to fit the content, then flushes the buffer to the output sink as plain
//! text lines.

use std::io::{self, Write};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Row, Table, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::data::RankingRow;

/// Column headings, in display order
const HEADERS: [&str; 5] = ["Rank", "Title", "Date", "Score", "URL"];

/// Gap between columns
const COLUMN_SPACING: u16 = 2;

/// Cell text for one row, in `HEADERS` order
fn row_cells(row: &RankingRow) -> [String; 5] {
    [
        row.rank.to_string(),
        row.title.clone(),
        row.air_date.clone(),
        row.score_text(),
        row.url(),
    ]
}

/// Widest cell per column, header included
fn column_widths(cells: &[[String; 5]]) -> [u16; 5] {
    let mut widths = HEADERS.map(|h| h.width() as u16);
    for row in cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width() as u16);
        }
    }
    widths
}

/// Renders the table into a buffer just large enough to hold it
pub fn render_to_buffer(title: &str, rows: &[RankingRow]) -> Buffer {
    let cells: Vec<[String; 5]> = rows.iter().map(row_cells).collect();
    let mut widths = column_widths(&cells);

    let content_width: u16 =
        widths.iter().sum::<u16>() + COLUMN_SPACING * (widths.len() as u16 - 1);
    let title_width = title.width() as u16;
    if title_width > content_width {
        // widen the last column so the title is not clipped
        widths[widths.len() - 1] += title_width - content_width;
    }
    let inner_width = content_width.max(title_width);

    // borders plus header plus one line per row
    let height = cells.len() as u16 + 3;
    let area = Rect::new(0, 0, inner_width + 2, height);

    let header = Row::new(HEADERS).style(Style::default().add_modifier(Modifier::BOLD));
    let body = cells.into_iter().map(Row::new);
    let constraints = widths.map(Constraint::Length);

    let table = Table::new(body, constraints)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(
            Block::bordered()
                .title(title.to_string())
                .title_alignment(Alignment::Center),
        );

    let mut buffer = Buffer::empty(area);
    table.render(area, &mut buffer);
    buffer
}

/// Converts a buffer into text lines with trailing blanks removed
///
/// Wide glyphs occupy two cells; the cell after one is padding and is skipped.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    if width == 0 {
        return Vec::new();
    }

    buffer
        .content
        .chunks(width)
        .map(|row| {
            let mut line = String::new();
            let mut skip = 0usize;
            for cell in row {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                line.push_str(symbol);
                skip = symbol.width().saturating_sub(1);
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Writes the rankings table for `rows` to `out`
pub fn write_rankings(out: &mut dyn Write, title: &str, rows: &[RankingRow]) -> io::Result<()> {
    let buffer = render_to_buffer(title, rows);
    for line in buffer_lines(&buffer) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
