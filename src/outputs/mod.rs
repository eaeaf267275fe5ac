//! Report generation for CSV, HTML, and YAML.
//!
//! A sift produces ranked [`Word`]s; this module turns them into a
//! [`Report`] (caption plus rows with suppressed fields removed) and renders
//! it in one of three formats:
//!
//! # Submodules
//!
//! - [`csv`]: spreadsheet-friendly rows, caption as a leading `#` comment
//! - [`html`]: standalone page with a styled table
//! - [`yaml`]: `caption` plus a `words` list, for further processing
//!
//! Suppression happens here, after ranking, so hiding a column never changes
//! the order of the rows.

pub mod csv;
pub mod html;
pub mod yaml;

use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use crate::errors::Result;
use crate::models::Word;
use crate::utils::ensure_parent_dir;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Html,
    Yaml,
}

impl Format {
    /// Guess the format from an output file's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Format::Csv),
            "htm" | "html" => Some(Format::Html),
            "yml" | "yaml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Which report fields to leave out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ignore {
    pub freq: bool,
    pub word: bool,
    pub kana: bool,
    pub eng: bool,
    pub defn: bool,
}

/// A report column, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Freq,
    Word,
    Kana,
    Eng,
    Defn,
}

impl Column {
    pub const ALL: [Column; 5] = [Column::Freq, Column::Word, Column::Kana, Column::Eng, Column::Defn];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Freq => "Frequency",
            Column::Word => "Word",
            Column::Kana => "Kana",
            Column::Eng => "English",
            Column::Defn => "Definition",
        }
    }

    fn is_ignored(&self, ignore: &Ignore) -> bool {
        match self {
            Column::Freq => ignore.freq,
            Column::Word => ignore.word,
            Column::Kana => ignore.kana,
            Column::Eng => ignore.eng,
            Column::Defn => ignore.defn,
        }
    }
}

/// One word as presented in a report. Suppressed fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eng: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defn: Option<String>,
}

impl ReportRow {
    fn from_word(word: &Word, ignore: &Ignore) -> Self {
        let keep = |ignored: bool, value: Option<&str>| {
            if ignored { None } else { value.map(str::to_string) }
        };
        Self {
            freq: (!ignore.freq).then_some(word.freq),
            word: keep(ignore.word, Some(word.word())),
            kana: keep(ignore.kana, word.kana.as_deref()),
            eng: keep(ignore.eng, word.eng.as_deref()),
            defn: keep(ignore.defn, word.defn.as_deref()),
        }
    }

    /// Text for one table cell; empty when the field is absent.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Freq => self.freq.map(|f| f.to_string()).unwrap_or_default(),
            Column::Word => self.word.clone().unwrap_or_default(),
            Column::Kana => self.kana.clone().unwrap_or_default(),
            Column::Eng => self.eng.clone().unwrap_or_default(),
            Column::Defn => self.defn.clone().unwrap_or_default(),
        }
    }
}

/// A ranked vocabulary list ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub caption: String,
    #[serde(skip)]
    pub columns: Vec<Column>,
    pub words: Vec<ReportRow>,
}

impl Report {
    /// Build a report from already-ranked words.
    pub fn new(caption: String, words: &[Word], ignore: &Ignore) -> Self {
        Self {
            caption,
            columns: Column::ALL
                .into_iter()
                .filter(|column| !column.is_ignored(ignore))
                .collect(),
            words: words.iter().map(|word| ReportRow::from_word(word, ignore)).collect(),
        }
    }
}

/// Render `report` as text in `format`.
pub fn render(report: &Report, format: Format) -> Result<String> {
    match format {
        Format::Csv => csv::to_csv(report),
        Format::Html => Ok(html::to_html(report)),
        Format::Yaml => yaml::to_yaml(report),
    }
}

/// Write a rendered report to `out`, or to stdout when no path is given.
#[instrument(level = "info", skip_all, fields(out = ?out, bytes = text.len()))]
pub async fn write_report(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            ensure_parent_dir(path).await?;
            fs::write(path, text).await?;
            info!(path = %path.display(), "Wrote report");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
