//! CSV rendering.
//!
//! ```text
//! # Easy News: 2 words from 1 of 1 articles
//! Frequency,Word,Kana,English,Definition
//! 5,雨,あめ,rain,空から降る水。
//! ```

use super::Report;
use crate::errors::{Result, SiftError};

/// Render `report` as CSV with the caption as a leading comment line.
pub fn to_csv(report: &Report) -> Result<String> {
    let mut out = format!("# {}\n", report.caption.replace('\n', " "));

    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(report.columns.iter().map(|column| column.header()))?;
    for row in &report.words {
        writer.write_record(report.columns.iter().map(|&column| row.cell(column)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SiftError::Io(e.into_error()))?;

    out.push_str(&String::from_utf8(bytes)?);
    Ok(out)
}
