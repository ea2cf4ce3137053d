//! HTML table markup.

use std::fmt::Write;

use crate::adapter::DecodedTable;
use crate::cell::{CellView, RowView};
use crate::error::Error;

/// Render a decoded table as an HTML fragment.
///
/// Header rows go to `<thead>`, data rows to `<tbody>`. Cells use `th` or
/// `td` by role and carry their class names and ids. A table without data
/// rows gets one placeholder row spanning every visible column.
#[must_use]
pub fn to_html(table: &DecodedTable) -> String {
    let mut out = String::new();

    if let Some(styles) = table.styles.as_deref().filter(|s| !s.is_empty()) {
        out.push_str("<style>");
        out.push_str(&styles.replace("</", "<\\/"));
        out.push_str("</style>\n");
    }

    match &table.uuid {
        Some(uuid) => {
            let _ = writeln!(out, "<table id=\"T_{}\">", escape(uuid));
        }
        None => out.push_str("<table>\n"),
    }

    if let Some(caption) = &table.caption {
        let _ = writeln!(out, "<caption>{}</caption>", escape(caption));
    }

    out.push_str("<thead>\n");
    for row in &table.header {
        push_row(&mut out, row);
    }
    out.push_str("</thead>\n<tbody>\n");
    if table.is_empty() {
        let _ = writeln!(
            out,
            "<tr><td colspan=\"{}\" class=\"empty\">empty</td></tr>",
            table.column_span
        );
    } else {
        for row in &table.body {
            push_row(&mut out, row);
        }
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Marked error view shown instead of a table.
#[must_use]
pub fn error_html(error: &Error) -> String {
    format!(
        "<div class=\"table-error\" role=\"alert\">{}</div>\n",
        escape(&error.to_string())
    )
}

fn push_row(out: &mut String, row: &RowView) {
    out.push_str("<tr>");
    for cell in &row.cells {
        push_cell(out, cell);
    }
    out.push_str("</tr>\n");
}

fn push_cell(out: &mut String, cell: &CellView) {
    let tag = cell.role.html_tag();
    out.push('<');
    out.push_str(tag);
    if let Some(id) = &cell.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if let Some(class_names) = &cell.class_names {
        let _ = write!(out, " class=\"{}\"", escape(class_names));
    }
    out.push('>');
    out.push_str(&escape(&cell.text));
    let _ = write!(out, "</{tag}>");
}

/// Escape text for element content and quoted attribute values.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
