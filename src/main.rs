//! # Easy News Sifter
//!
//! Turns scraped news articles into a frequency-ranked vocabulary list.
//! Articles come from a news site's "easy" (learner) and "regular" variants
//! and carry the furigana-annotated words found in them, with dictionary
//! definitions and English glosses. The sifter narrows them by publication
//! time, title or URL, sums word frequencies, and writes CSV, HTML or YAML.
//!
//! ## Usage
//!
//! ```sh
//! easy_news_sifter -d '2020-7-1...2020-7-31' -o reports/july.csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Loading**: Read the article store (YAML or JSON)
//! 2. **Filtering**: Parse the datetime range and text filters
//! 3. **Sifting**: Merge word frequencies of the remaining articles and rank them
//! 4. **Output**: Render the report and write it to a file or stdout

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod datetime;
mod errors;
mod models;
mod outputs;
mod sifter;
mod store;
mod utils;

use cli::Cli;
use datetime::DatetimeRangeParser;
use outputs::Report;
use sifter::{ArticleFilterSet, Sifter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr so a report on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let input = args.input_path();
    let format = args.report_format();
    info!(kind = %args.kind, input = %input.display(), ?format, "easy_news_sifter starting up");

    // ---- Filters ----
    let parser = DatetimeRangeParser::from_clock();
    let filters = match args.filter_spec(&parser) {
        Ok(spec) => spec,
        Err(e) => {
            error!(error = %e, "Invalid filter options");
            return Err(e.into());
        }
    };
    if filters.is_empty() {
        info!("No filters given; sifting every article");
    } else if let Some(range) = &filters.datetime {
        info!(%range, "Filtering by datetime");
    }

    // ---- Load & sift ----
    let articles = match store::load_articles(&input).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(path = %input.display(), error = %e, "Failed to load article store");
            return Err(e.into());
        }
    };

    let sifter = Sifter::new(&articles, ArticleFilterSet::new(filters));
    let outcome = sifter.sift();
    let caption = sifter.caption(args.kind, &outcome);
    info!(
        included = outcome.included,
        excluded = outcome.excluded,
        %caption,
        "Sift complete"
    );

    // ---- Output ----
    let report = Report::new(caption, &outcome.words, &args.ignore());
    let text = outputs::render(&report, format)?;
    if let Err(e) = outputs::write_report(&text, args.output.as_deref()).await {
        error!(error = %e, "Failed to write report");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
