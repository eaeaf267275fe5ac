//! Command-line interface definitions for the sifter.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Paths and the news kind can also come from environment variables so a
//! cron job can be configured without touching its command line.

use clap::Parser;
use std::path::PathBuf;

use crate::datetime::DatetimeRangeParser;
use crate::errors::Result;
use crate::models::NewsKind;
use crate::outputs::{Format, Ignore};
use crate::sifter::{FilterSpec, TextFilter};

/// Command-line arguments for the sifter.
///
/// # Examples
///
/// ```sh
/// # Every word from July 2020 easy articles, as CSV on stdout
/// easy_news_sifter --datetime 2020-7
///
/// # A week of regular articles mentioning a topic, as an HTML page
/// easy_news_sifter -k regular -d '7-4...7-9' -t '台風' -o reports/typhoon.html
///
/// # Everything up to Christmas 2020, frequencies and glosses hidden
/// easy_news_sifter -d '...2020-12-25' --no-freq --no-eng -f yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Which variant of the news site to sift
    #[arg(short, long, value_enum, env = "SIFT_KIND", default_value = "easy")]
    pub kind: NewsKind,

    /// Article store to read (.yml, .yaml or .json); defaults per --kind
    #[arg(short = 'i', long = "in", env = "SIFT_IN")]
    pub input: Option<PathBuf>,

    /// Report file to write; stdout when omitted
    #[arg(short, long = "out", env = "SIFT_OUT")]
    pub output: Option<PathBuf>,

    /// Report format; guessed from --out's extension, else CSV
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Datetime range, e.g. '2020-12', '7-4...7-9', '...2020-12-25'
    #[arg(short, long)]
    pub datetime: Option<String>,

    /// Keep only articles whose title contains this text
    #[arg(short, long)]
    pub title: Option<String>,

    /// Keep only articles whose URL contains this text
    #[arg(short, long)]
    pub url: Option<String>,

    /// Match --title and --url ignoring case
    #[arg(short = 'c', long)]
    pub ignore_case: bool,

    /// Match --title and --url ignoring whitespace
    #[arg(short = 's', long)]
    pub ignore_space: bool,

    /// Leave the frequency column out of the report
    #[arg(long)]
    pub no_freq: bool,

    /// Leave the word column out of the report
    #[arg(long)]
    pub no_word: bool,

    /// Leave the kana column out of the report
    #[arg(long)]
    pub no_kana: bool,

    /// Leave the English column out of the report
    #[arg(long)]
    pub no_eng: bool,

    /// Leave the definition column out of the report
    #[arg(long)]
    pub no_defn: bool,
}

impl Cli {
    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.kind.default_store_path()))
    }

    pub fn report_format(&self) -> Format {
        self.format
            .or_else(|| self.output.as_deref().and_then(Format::from_path))
            .unwrap_or(Format::Csv)
    }

    pub fn ignore(&self) -> Ignore {
        Ignore {
            freq: self.no_freq,
            word: self.no_word,
            kana: self.no_kana,
            eng: self.no_eng,
            defn: self.no_defn,
        }
    }

    /// Build the article filters, parsing `--datetime` with `parser`.
    ///
    /// Blank `--title`/`--url` values are treated as absent.
    pub fn filter_spec(&self, parser: &DatetimeRangeParser) -> Result<FilterSpec> {
        let text_filter = |text: &Option<String>| {
            text.as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(|t| TextFilter::new(t, self.ignore_case, self.ignore_space))
        };

        let spec = FilterSpec {
            datetime: self.datetime.as_deref().map(|d| parser.parse(d)).transpose()?,
            title: text_filter(&self.title),
            url: text_filter(&self.url),
        };
        spec.validate()?;
        Ok(spec)
    }
}
