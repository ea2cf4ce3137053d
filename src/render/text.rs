//! Fixed-width plain text rendering.

use unicode_width::UnicodeWidthStr;

use crate::adapter::DecodedTable;
use crate::cell::RowView;
use crate::table::truncate_string;

/// Widest a column gets before truncation.
const MAX_COLUMN_WIDTH: usize = 50;
/// Narrowest a column gets.
const MIN_COLUMN_WIDTH: usize = 3;

/// Render a decoded table as text lines no wider than `max_width`.
///
/// Columns are separated by one space. Header rows are followed by a dashed
/// rule; a table without data rows shows `(empty)` instead of a body.
/// Trailing columns that do not fit at the minimum width are left out.
#[must_use]
pub fn to_text(table: &DecodedTable, max_width: usize) -> Vec<String> {
    let widths = column_widths(table, max_width);
    let mut lines = Vec::with_capacity(table.header.len() + table.body.len() + 3);

    if let Some(caption) = &table.caption {
        lines.push(truncate_string(caption, max_width));
    }
    for row in &table.header {
        lines.push(format_row(row, &widths, max_width));
    }

    let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    lines.push("-".repeat(rule_width.min(max_width)));

    if table.is_empty() {
        lines.push(truncate_string("(empty)", max_width));
    } else {
        for row in &table.body {
            lines.push(format_row(row, &widths, max_width));
        }
    }
    lines
}

/// Column widths from content, capped and scaled to fit `max_width`.
fn column_widths(table: &DecodedTable, max_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in table.header.iter().chain(&table.body) {
        for (col, cell) in row.cells.iter().enumerate() {
            let width = UnicodeWidthStr::width(cell.text.as_str()).min(MAX_COLUMN_WIDTH);
            match widths.get_mut(col) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    for w in &mut widths {
        *w = (*w).max(MIN_COLUMN_WIDTH);
    }

    let separators = widths.len().saturating_sub(1);
    let available = max_width.saturating_sub(separators);
    let total: usize = widths.iter().sum();
    if total > available && available > 0 {
        for w in &mut widths {
            *w = (*w * available / total).max(MIN_COLUMN_WIDTH);
        }
    }

    let mut used = 0;
    let fitting = widths
        .iter()
        .take_while(|&&w| {
            let next = used + w + usize::from(used > 0);
            if next > max_width {
                return false;
            }
            used = next;
            true
        })
        .count();
    if fitting < widths.len() {
        log::debug!(
            "text layout: {} of {} columns fit in {max_width}",
            fitting,
            widths.len()
        );
        widths.truncate(fitting);
    }
    widths
}

fn format_row(row: &RowView, widths: &[usize], max_width: usize) -> String {
    let cells: Vec<String> = row
        .cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let text = truncate_string(&cell.text, width);
            let pad = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
            format!("{text}{}", " ".repeat(pad))
        })
        .collect();
    truncate_string(cells.join(" ").trim_end(), max_width)
}
