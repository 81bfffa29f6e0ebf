//! Word-frequency analysis over translated titles.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Count lowercase word tokens across all input strings.
///
/// Each string is case-folded, maximal runs of word characters become
/// tokens, and everything else separates them. Counts accumulate across
/// the whole input into one mapping; iteration order is unspecified. An
/// empty input yields an empty mapping.
pub fn word_frequencies(strings: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for s in strings {
        let lowered = s.to_lowercase();
        for token in WORD_REGEX.find_iter(&lowered) {
            *counts.entry(token.as_str().to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(strings: &[&str]) -> HashMap<String, usize> {
        word_frequencies(&strings.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_counts_accumulate_across_strings() {
        let counts = freq(&["The Future", "Our Future Today"]);

        assert_eq!(counts.len(), 4);
        assert_eq!(counts["the"], 1);
        assert_eq!(counts["future"], 2);
        assert_eq!(counts["our"], 1);
        assert_eq!(counts["today"], 1);
    }

    #[test]
    fn test_punctuation_separates_tokens() {
        let counts = freq(&["Hope, fear — and hope again!"]);

        assert_eq!(counts["hope"], 2);
        assert_eq!(counts["and"], 1);
        assert!(!counts.contains_key(""));
    }

    #[test]
    fn test_case_folding() {
        let counts = freq(&["Future FUTURE future"]);
        assert_eq!(counts["future"], 3);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        assert!(word_frequencies(&[]).is_empty());
        assert!(freq(&["", "   ", "—!?"]).is_empty());
    }
}
