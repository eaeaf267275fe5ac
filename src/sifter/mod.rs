//! Sifting: filter articles, merge their words, rank the vocabulary.
//!
//! # Pipeline
//!
//! 1. **Filter**: [`ArticleFilterSet`] drops articles outside the requested
//!    datetime range or whose title/URL lack the requested text
//! 2. **Merge**: [`WordAggregator`] sums frequencies per word key in article
//!    order, keeping the first-seen definition and gloss
//! 3. **Rank**: merged words are sorted by [`aggregate::compare_words`]
//!
//! Everything here is synchronous and pure; the same articles in the same
//! order always produce the same ranking.

pub mod aggregate;
pub mod filter;

pub use aggregate::WordAggregator;
pub use filter::{ArticleFilterSet, FilterSpec, TextFilter};

use tracing::{debug, info, instrument};

use crate::models::{Article, NewsKind, Word};
use crate::utils::truncate_for_log;

/// Result of one sift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiftOutcome {
    /// Merged words in report order.
    pub words: Vec<Word>,
    /// Articles that passed the filters.
    pub included: usize,
    /// Articles left out by the filters.
    pub excluded: usize,
}

/// Runs the filter, merge and rank pipeline over a set of articles.
pub struct Sifter<'a> {
    articles: &'a [Article],
    filters: ArticleFilterSet,
}

impl<'a> Sifter<'a> {
    pub fn new(articles: &'a [Article], filters: ArticleFilterSet) -> Self {
        Self { articles, filters }
    }

    #[instrument(level = "info", skip_all, fields(articles = self.articles.len()))]
    pub fn sift(&self) -> SiftOutcome {
        let mut aggregator = WordAggregator::new();
        let mut included = 0;

        for article in self.articles {
            if self.filters.excludes(article) {
                debug!(
                    title = %truncate_for_log(&article.title, 40),
                    url = %article.url,
                    "Excluded article"
                );
                continue;
            }
            aggregator.merge_article(article);
            included += 1;
        }

        let excluded = self.articles.len() - included;
        let words = aggregator.into_sorted();
        info!(included, excluded, words = words.len(), "Sifted articles");

        SiftOutcome {
            words,
            included,
            excluded,
        }
    }

    /// One-line description of what a report contains and how it was filtered.
    ///
    /// ```text
    /// Easy News: 2 words from 1 of 3 articles; datetime 2020-07-01 00:00:00...2020-07-31 23:59:59, title "雨"
    /// ```
    pub fn caption(&self, kind: NewsKind, outcome: &SiftOutcome) -> String {
        let mut caption = format!(
            "{}: {} words from {} of {} articles",
            kind,
            outcome.words.len(),
            outcome.included,
            self.articles.len()
        );

        let spec = self.filters.spec();
        let mut applied = Vec::new();
        if let Some(range) = &spec.datetime {
            applied.push(format!("datetime {range}"));
        }
        if let Some(title) = &spec.title {
            applied.push(format!("title {title}"));
        }
        if let Some(url) = &spec.url {
            applied.push(format!("url {url}"));
        }
        if !applied.is_empty() {
            caption.push_str("; ");
            caption.push_str(&applied.join(", "));
        }
        caption
    }
}
