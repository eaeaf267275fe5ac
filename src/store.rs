//! Loading scraped articles from disk.
//!
//! The scraper persists every article it has seen into a single store file,
//! YAML by default (JSON is accepted too):
//!
//! ```yaml
//! articles:
//!   - datetime: 2020-07-01T13:10:00+09:00
//!     title: 大雨で川の水が増える
//!     url: https://example.com/easy/k10012345.html
//!     words:
//!       大雨=おおあめ: { kanji: 大雨, kana: おおあめ, freq: 3, defn: たくさん降る雨。, eng: heavy rain }
//! ```

use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::errors::{Result, SiftError};
use crate::models::{Article, ArticleStore};

/// Read and decode the article store at `path`, dropping invalid words.
///
/// The format is picked from the extension: `.yml`/`.yaml` or `.json`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let text = fs::read_to_string(path).await?;
    let store: ArticleStore = match ext.as_str() {
        "yml" | "yaml" => serde_yaml::from_str(&text)?,
        "json" => serde_json::from_str(&text)?,
        _ => return Err(SiftError::UnsupportedStore(path.display().to_string())),
    };

    let mut articles = store.articles;
    for article in &mut articles {
        drop_invalid_words(article);
    }
    info!(count = articles.len(), "Loaded articles");
    Ok(articles)
}

fn drop_invalid_words(article: &mut Article) {
    let Some(words) = article.words.as_mut() else {
        return;
    };
    words.retain(|word| match word.invalid_reason() {
        Some(reason) => {
            warn!(url = %article.url, key = %word.key(), reason, "Dropping invalid word");
            false
        }
        None => true,
    });
}
