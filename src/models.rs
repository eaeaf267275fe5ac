//! Data models for scraped articles and their vocabulary.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One scraped article with its publication time and words
//! - [`Word`]: A furigana-annotated vocabulary item with its frequency
//! - [`ArticleStore`]: The on-disk collection of articles a sift reads from
//! - [`NewsKind`]: Which variant of the news site the articles came from
//!
//! Field names are kept short (`freq`, `defn`, `eng`) to keep the YAML store
//! files compact, since they hold tens of thousands of words.

use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which variant of the news site articles were scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsKind {
    /// Simplified articles written for learners, with furigana on every kanji.
    Easy,
    /// Regular articles, furigana only where the site provides it.
    Regular,
}

impl NewsKind {
    /// Human label used in report captions.
    pub fn label(&self) -> &'static str {
        match self {
            NewsKind::Easy => "Easy News",
            NewsKind::Regular => "Regular News",
        }
    }

    /// Default store file for this variant.
    pub fn default_store_path(&self) -> &'static str {
        match self {
            NewsKind::Easy => "data/easy_news.yml",
            NewsKind::Regular => "data/regular_news.yml",
        }
    }
}

impl fmt::Display for NewsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A vocabulary item extracted from an article's furigana.
///
/// At least one of `kanji` and `kana` is present. Words written purely in
/// kana have no `kanji`; words whose reading the scraper could not recover
/// have no `kana`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,
    /// Times the word occurs. Always at least 1.
    #[serde(default = "default_freq")]
    pub freq: u64,
    /// Japanese dictionary definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defn: Option<String>,
    /// English gloss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eng: Option<String>,
}

fn default_freq() -> u64 {
    1
}

impl Word {
    /// Why this word cannot take part in a sift, if it cannot.
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.kanji.is_none() && self.kana.is_none() {
            Some("word has neither kanji nor kana")
        } else if self.freq == 0 {
            Some("word has a frequency of 0")
        } else {
            None
        }
    }

    /// Merge identity: `"{kanji}={kana}"`, absent parts left empty.
    pub fn key(&self) -> String {
        format!(
            "{}={}",
            self.kanji.as_deref().unwrap_or(""),
            self.kana.as_deref().unwrap_or("")
        )
    }

    /// The spelling shown to readers: kanji if known, else kana.
    pub fn word(&self) -> &str {
        self.kanji
            .as_deref()
            .or(self.kana.as_deref())
            .unwrap_or("")
    }
}

/// One scraped article.
///
/// `words` is `None` when the scraper found no furigana at all; such an
/// article simply contributes nothing to a sift. On disk the words are a
/// mapping keyed by [`Word::key`]; in memory they keep the order the
/// mapping was written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Publication time, when the page exposed one.
    #[serde(default)]
    pub datetime: Option<DateTime<FixedOffset>>,
    pub title: String,
    pub url: String,
    #[serde(default, with = "word_map")]
    pub words: Option<Vec<Word>>,
}

impl Article {
    /// Words in source order; empty when the article has none.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().flatten()
    }
}

/// (De)serializes an article's words as a `"{kanji}={kana}"`-keyed mapping
/// while keeping entries in document order.
mod word_map {
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use super::Word;

    pub fn serialize<S>(words: &Option<Vec<Word>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match words {
            Some(words) => serializer.collect_map(words.iter().map(|word| (word.key(), word))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Word>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WordsVisitor;

        impl<'de> Visitor<'de> for WordsVisitor {
            type Value = Option<Vec<Word>>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of word keys to words, or null")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_map(self)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut words = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_key, word)) = map.next_entry::<String, Word>()? {
                    words.push(word);
                }
                Ok(Some(words))
            }
        }

        deserializer.deserialize_option(WordsVisitor)
    }
}

/// The file format articles are persisted in between scraping and sifting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleStore {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Builders used by tests across the crate.
#[cfg(test)]
impl Word {
    /// A word seen once, without definitions. `None` without a spelling.
    pub fn new(kanji: Option<&str>, kana: Option<&str>) -> Option<Self> {
        let word = Self {
            kanji: kanji.map(str::to_string),
            kana: kana.map(str::to_string),
            freq: 1,
            defn: None,
            eng: None,
        };
        word.invalid_reason().is_none().then_some(word)
    }

    pub fn with_freq(mut self, freq: u64) -> Self {
        self.freq = freq;
        self
    }

    pub fn with_defn(mut self, defn: &str) -> Self {
        self.defn = Some(defn.to_string());
        self
    }

    pub fn with_eng(mut self, eng: &str) -> Self {
        self.eng = Some(eng.to_string());
        self
    }
}

#[cfg(test)]
impl Article {
    pub fn new(datetime: Option<DateTime<FixedOffset>>, title: &str, url: &str) -> Self {
        Self {
            datetime,
            title: title.to_string(),
            url: url.to_string(),
            words: None,
        }
    }

    /// Add a word, summing frequencies when its key is already present.
    pub fn add_word(&mut self, word: Word) {
        let words = self.words.get_or_insert_with(Vec::new);
        match words.iter_mut().find(|existing| existing.key() == word.key()) {
            Some(existing) => existing.freq += word.freq,
            None => words.push(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jst;
    use chrono::TimeZone;

    #[test]
    fn test_word_requires_a_spelling() {
        assert!(Word::new(None, None).is_none());
        assert!(Word::new(Some("日本"), None).is_some());
        assert!(Word::new(None, Some("にほん")).is_some());
    }

    #[test]
    fn test_word_key() {
        let both = Word::new(Some("日本"), Some("にほん")).unwrap();
        let kana = Word::new(None, Some("にほん")).unwrap();
        let kanji = Word::new(Some("日本"), None).unwrap();
        assert_eq!(both.key(), "日本=にほん");
        assert_eq!(kana.key(), "=にほん");
        assert_eq!(kanji.key(), "日本=");
    }

    #[test]
    fn test_display_word_prefers_kanji() {
        assert_eq!(Word::new(Some("日本"), Some("にほん")).unwrap().word(), "日本");
        assert_eq!(Word::new(None, Some("にほん")).unwrap().word(), "にほん");
    }

    #[test]
    fn test_add_word_sums_repeats() {
        let mut article = Article::new(None, "テスト", "https://example.com/a");
        article.add_word(Word::new(Some("雨"), Some("あめ")).unwrap());
        article.add_word(Word::new(Some("雨"), Some("あめ")).unwrap().with_freq(2));
        article.add_word(Word::new(None, Some("あめ")).unwrap());

        let keys: Vec<String> = article.words().map(Word::key).collect();
        assert_eq!(keys, ["雨=あめ", "=あめ"]);
        assert_eq!(article.words().next().unwrap().freq, 3);
    }

    #[test]
    fn test_article_without_words() {
        let article = Article::new(None, "t", "u");
        assert_eq!(article.words().count(), 0);
    }

    #[test]
    fn test_store_yaml_deserialization() {
        let yaml = r#"
articles:
  - datetime: "2020-07-01T13:10:00+09:00"
    title: "大雨で川の水が増える"
    url: "https://example.com/easy/k100"
    words:
      "大雨=おおあめ":
        kanji: 大雨
        kana: おおあめ
        freq: 3
        defn: たくさん降る雨。
        eng: heavy rain
  - title: "no date"
    url: "https://example.com/easy/k101"
"#;
        let store: ArticleStore = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(store.articles.len(), 2);

        let first = &store.articles[0];
        assert_eq!(first.datetime, Some(jst().with_ymd_and_hms(2020, 7, 1, 13, 10, 0).unwrap()));
        let word = first.words().next().unwrap();
        assert_eq!(word.freq, 3);
        assert_eq!(word.eng.as_deref(), Some("heavy rain"));

        let second = &store.articles[1];
        assert_eq!(second.datetime, None);
        assert!(second.words.is_none());
    }

    #[test]
    fn test_word_freq_defaults_to_one() {
        let word: Word = serde_json::from_str(r#"{"kana": "あめ"}"#).unwrap();
        assert_eq!(word.freq, 1);
        assert_eq!(word.invalid_reason(), None);
    }

    #[test]
    fn test_invalid_reason_names_the_failed_check() {
        let unspelled: Word = serde_json::from_str(r#"{"freq": 2}"#).unwrap();
        assert_eq!(unspelled.invalid_reason(), Some("word has neither kanji nor kana"));
        let unseen: Word = serde_json::from_str(r#"{"kana": "あめ", "freq": 0}"#).unwrap();
        assert_eq!(unseen.invalid_reason(), Some("word has a frequency of 0"));
    }

    #[test]
    fn test_words_keep_document_order() {
        let yaml = r#"
title: t
url: u
words:
  "雨=あめ": { kanji: 雨, kana: あめ }
  "=あめ": { kana: あめ }
  "川=かわ": { kanji: 川, kana: かわ }
  "亜=あ": { kanji: 亜, kana: あ }
"#;
        let article: Article = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<String> = article.words().map(Word::key).collect();
        assert_eq!(keys, ["雨=あめ", "=あめ", "川=かわ", "亜=あ"]);

        let json = r#"{"title": "t", "url": "u",
            "words": {"z=": {"kanji": "z"}, "a=": {"kanji": "a"}}}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        let keys: Vec<String> = article.words().map(Word::key).collect();
        assert_eq!(keys, ["z=", "a="]);
    }

    #[test]
    fn test_words_serialize_as_keyed_mapping() {
        let mut article = Article::new(None, "t", "u");
        article.add_word(Word::new(Some("雨"), Some("あめ")).unwrap().with_freq(2));
        article.add_word(Word::new(None, Some("すごい")).unwrap());

        let yaml = serde_yaml::to_string(&article).unwrap();
        let back: Article = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, article);

        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc["words"]["雨=あめ"]["freq"].as_u64(), Some(2));
        assert_eq!(doc["words"]["=すごい"]["kana"].as_str(), Some("すごい"));
    }

    #[test]
    fn test_null_words_mean_none() {
        let article: Article = serde_json::from_str(r#"{"title": "t", "url": "u", "words": null}"#).unwrap();
        assert!(article.words.is_none());
    }

    #[test]
    fn test_news_kind_labels() {
        assert_eq!(NewsKind::Easy.to_string(), "Easy News");
        assert_eq!(NewsKind::Regular.default_store_path(), "data/regular_news.yml");
    }
}
