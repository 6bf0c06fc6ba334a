// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hypher::Lang;

use super::Hyphenator;

/// Pattern based hyphenation with `hypher`.
#[derive(Clone, Copy, Debug)]
pub struct HypherHyphenator {
    lang: Lang,
}

impl HypherHyphenator {
    /// Creates a hyphenator for `lang`.
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// Creates a hyphenator from a two letter ISO 639-1 code, if `hypher` supports it.
    pub fn from_iso(code: &str) -> Option<Self> {
        let bytes: [u8; 2] = code.as_bytes().try_into().ok()?;
        Lang::from_iso(bytes).map(Self::new)
    }
}

impl Default for HypherHyphenator {
    fn default() -> Self {
        Self::new(Lang::English)
    }
}

impl Hyphenator for HypherHyphenator {
    fn hyphenate<'a>(&self, word: &'a str) -> Vec<&'a str> {
        let lower = word.to_lowercase();
        if lower.len() != word.len() {
            return hypher::hyphenate(word, self.lang).collect();
        }
        // Patterns are lowercase; map the syllables of the lowercased word back onto `word`.
        let mut syllables = Vec::new();
        let mut start = 0;
        for syllable in hypher::hyphenate(&lower, self.lang) {
            let end = start + syllable.len();
            syllables.push(&word[start..end]);
            start = end;
        }
        syllables
    }
}

/// A hyphenator that never splits words.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHyphenation;

impl Hyphenator for NoHyphenation {
    fn hyphenate<'a>(&self, word: &'a str) -> Vec<&'a str> {
        vec![word]
    }
}

#[cfg(test)]
mod tests {
    use super::{HypherHyphenator, NoHyphenation};
    use crate::analysis::Hyphenator;

    #[test]
    fn syllables_concatenate_to_word() {
        let word = "Hyphenation";
        let syllables = HypherHyphenator::default().hyphenate(word);
        assert!(syllables.len() > 1);
        assert_eq!(syllables.concat(), word);
    }

    #[test]
    fn no_hyphenation_keeps_word() {
        assert_eq!(NoHyphenation.hyphenate("word"), vec!["word"]);
    }

    #[test]
    fn iso_codes() {
        assert!(HypherHyphenator::from_iso("en").is_some());
        assert!(HypherHyphenator::from_iso("english").is_none());
    }
}
