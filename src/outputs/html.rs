//! HTML rendering: a standalone page with the caption and a styled table.

use std::fmt::{self, Write};

use super::Report;

const STYLE: &str = "\
body { font-family: \"Hiragino Sans\", \"Noto Sans JP\", sans-serif; margin: 2em; }
caption { font-weight: bold; font-size: 1.2em; padding: 0.5em; text-align: left; }
table { border-collapse: collapse; }
th, td { border: 1px solid #999; padding: 0.3em 0.6em; text-align: left; vertical-align: top; }
th { background-color: #2a4d69; color: #fff; }
tr:nth-child(even) { background-color: #f2f2f2; }
";

/// Escape text for use inside HTML elements and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `report` as a complete HTML document.
pub fn to_html(report: &Report) -> String {
    let mut html = String::new();
    write_html(report, &mut html).expect("writing to a String cannot fail");
    html
}

fn write_html(report: &Report, html: &mut String) -> fmt::Result {
    let caption = escape(&report.caption);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"ja\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{caption}</title>")?;
    writeln!(html, "<style>\n{STYLE}</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<table>")?;
    writeln!(html, "<caption>{caption}</caption>")?;

    write!(html, "<thead><tr>")?;
    for column in &report.columns {
        write!(html, "<th>{}</th>", column.header())?;
    }
    writeln!(html, "</tr></thead>")?;

    writeln!(html, "<tbody>")?;
    for row in &report.words {
        write!(html, "<tr>")?;
        for &column in &report.columns {
            write!(html, "<td>{}</td>", escape(&row.cell(column)))?;
        }
        writeln!(html, "</tr>")?;
    }
    writeln!(html, "</tbody>")?;

    writeln!(html, "</table>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(())
}
