// HTML output

use crate::record::FormatTree;
use std::fmt::Write;

/// Escape text for inclusion in HTML content or attribute values.
///
/// `&` is replaced first so the entities introduced by later replacements
/// are not escaped again. Escaping is not idempotent.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Render records as an HTML list for an interactive tree view.
///
/// Each `<li>` carries the node id and span as `data-` attributes so a
/// client can highlight the matching source range.
pub fn render_html(records: &[FormatTree]) -> String {
    let mut html = String::from("<ul class=\"syntax-tree\">\n");
    for record in records {
        // Writing to a String cannot fail
        let _ = writeln!(
            html,
            "  <li data-id=\"{}\" data-start=\"{}:{}\" data-end=\"{}:{}\">\
             <span class=\"prefix\">{}</span>\
             <span class=\"name\">{}</span>\
             <span class=\"span\">{}</span></li>",
            record.id,
            record.start_position.row,
            record.start_position.column,
            record.end_position.row,
            record.end_position.column,
            escape_html(&record.prefix),
            escape_html(&record.name),
            escape_html(&record.suffix),
        );
    }
    html.push_str("</ul>\n");
    html
}
