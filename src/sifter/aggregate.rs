//! Merging word frequencies across articles and ranking the result.

use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Article, Word};

/// Accumulates words from many articles into one frequency table.
///
/// The first occurrence of a word decides its spelling, definition and
/// gloss; later occurrences only add to its frequency. Merged words keep
/// first-seen order until [`WordAggregator::into_sorted`].
#[derive(Debug, Default)]
pub struct WordAggregator {
    index: HashMap<String, usize>,
    words: Vec<Word>,
}

impl WordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_word(&mut self, word: &Word) {
        let key = word.key();
        match self.index.get(&key) {
            Some(&i) => self.words[i].freq += word.freq,
            None => {
                self.index.insert(key, self.words.len());
                self.words.push(word.clone());
            }
        }
    }

    pub fn merge_article(&mut self, article: &Article) {
        for word in article.words() {
            self.merge_word(word);
        }
    }

    /// Merged words, most frequent first. See [`compare_words`].
    pub fn into_sorted(self) -> Vec<Word> {
        self.words.into_iter().sorted_by(compare_words).collect()
    }
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

fn defn(word: &Word) -> &str {
    word.defn.as_deref().unwrap_or("")
}

fn kana(word: &Word) -> &str {
    word.kana.as_deref().unwrap_or("")
}

/// Report order for merged words.
///
/// Frequency descending, then words with a definition first, then by
/// spelling, then words with a reading first, then by reading, then longer
/// definitions first, then by definition text. Strings compare by code point.
pub fn compare_words(a: &Word, b: &Word) -> Ordering {
    b.freq
        .cmp(&a.freq)
        .then_with(|| has_text(&b.defn).cmp(&has_text(&a.defn)))
        .then_with(|| a.word().cmp(b.word()))
        .then_with(|| has_text(&b.kana).cmp(&has_text(&a.kana)))
        .then_with(|| kana(a).cmp(kana(b)))
        .then_with(|| defn(b).chars().count().cmp(&defn(a).chars().count()))
        .then_with(|| defn(a).cmp(defn(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(kanji: Option<&str>, kana: Option<&str>, freq: u64) -> Word {
        Word::new(kanji, kana).unwrap().with_freq(freq)
    }

    fn spellings(words: &[Word]) -> Vec<String> {
        words.iter().map(Word::key).collect()
    }

    #[test]
    fn test_merge_sums_frequencies() {
        let mut first = Article::new(None, "a", "u1");
        first.add_word(word(Some("雨"), Some("あめ"), 2));
        first.add_word(word(Some("風"), Some("かぜ"), 1));
        let mut second = Article::new(None, "b", "u2");
        second.add_word(word(Some("雨"), Some("あめ"), 5));

        let mut aggregator = WordAggregator::new();
        aggregator.merge_article(&first);
        aggregator.merge_article(&second);

        let sorted = aggregator.into_sorted();
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].key(), "雨=あめ");
        assert_eq!(sorted[0].freq, 7);
        assert_eq!(sorted[1].freq, 1);
    }

    #[test]
    fn test_first_seen_descriptions_win() {
        let mut aggregator = WordAggregator::new();
        aggregator.merge_word(&word(Some("雨"), Some("あめ"), 1).with_defn("空から降る水。"));
        let later = word(Some("雨"), Some("あめ"), 1).with_defn("別の説明").with_eng("rain");
        aggregator.merge_word(&later);

        let sorted = aggregator.into_sorted();
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].freq, 2);
        assert_eq!(sorted[0].defn.as_deref(), Some("空から降る水。"));
        assert_eq!(sorted[0].eng, None);
    }

    #[test]
    fn test_article_without_words_contributes_nothing() {
        let mut aggregator = WordAggregator::new();
        aggregator.merge_article(&Article::new(None, "empty", "u"));
        assert!(aggregator.into_sorted().is_empty());
    }

    #[test]
    fn test_frequency_then_definition() {
        let words = vec![
            word(Some("低"), Some("ひく"), 1),
            word(Some("無"), Some("む"), 3),
            word(Some("有"), Some("ゆう"), 3).with_defn("ある"),
        ];
        let sorted: Vec<Word> = words.into_iter().sorted_by(compare_words).collect();
        assert_eq!(spellings(&sorted), ["有=ゆう", "無=む", "低=ひく"]);
    }

    #[test]
    fn test_empty_definition_counts_as_missing() {
        let with_empty = word(Some("あ"), None, 1).with_defn("");
        let with_text = word(Some("い"), None, 1).with_defn("x");
        assert_eq!(compare_words(&with_text, &with_empty), Ordering::Less);
    }

    #[test]
    fn test_spelling_then_kana_presence_then_kana() {
        let words = vec![
            word(Some("b"), Some("z"), 1),
            word(None, Some("a"), 1),
            word(Some("a"), None, 1),
            word(Some("a"), Some("y"), 1),
            word(Some("a"), Some("x"), 1),
        ];
        let sorted: Vec<Word> = words.into_iter().sorted_by(compare_words).collect();
        assert_eq!(spellings(&sorted), ["=a", "a=x", "a=y", "a=", "b=z"]);
    }

    #[test]
    fn test_longer_definition_then_definition_text() {
        let base = || word(Some("同"), Some("おな"), 1);
        let words = vec![base().with_defn("bb"), base().with_defn("aaa"), base().with_defn("aa")];
        let sorted: Vec<Word> = words.into_iter().sorted_by(compare_words).collect();
        let defns: Vec<&str> = sorted.iter().map(|w| w.defn.as_deref().unwrap()).collect();
        assert_eq!(defns, ["aaa", "aa", "bb"]);
    }

    #[test]
    fn test_exact_ties_keep_article_order() {
        // "k=k" and "=k" share spelling and kana, so every sort key ties.
        let mut article = Article::new(None, "a", "u");
        article.add_word(word(Some("k"), Some("k"), 1).with_eng("first"));
        article.add_word(word(None, Some("k"), 1).with_eng("second"));

        let mut aggregator = WordAggregator::new();
        aggregator.merge_article(&article);
        let sorted = aggregator.into_sorted();
        let glosses: Vec<&str> = sorted.iter().map(|w| w.eng.as_deref().unwrap()).collect();
        assert_eq!(glosses, ["first", "second"]);
    }

    #[test]
    fn test_sort_is_reproducible() {
        let build = || {
            let mut aggregator = WordAggregator::new();
            for (i, kana) in ["か", "き", "く", "け", "こ", "か", "こ"].into_iter().enumerate() {
                aggregator.merge_word(&word(None, Some(kana), (i % 3) as u64 + 1));
            }
            aggregator.into_sorted()
        };
        assert_eq!(build(), build());
    }
}
