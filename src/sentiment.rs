/// Maps free text to a signed polarity score.
///
/// Exactly one implementation is wired into a deployment. Scores are stored
/// with each entry at write time and never recomputed, so swapping the
/// scorer leaves historical entries on the old scale.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> i32;
}

pub const POSITIVE_WORDS: [&str; 8] = [
    "happy",
    "joy",
    "great",
    "awesome",
    "excellent",
    "good",
    "wonderful",
    "love",
];

pub const NEGATIVE_WORDS: [&str; 8] = [
    "sad",
    "angry",
    "terrible",
    "bad",
    "horrible",
    "hate",
    "upset",
    "disappointed",
];

/// Fixed keyword lexicon: +1 per positive token, -1 per negative token.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl SentimentScorer for KeywordScorer {
    fn score(&self, text: &str) -> i32 {
        tokenize(text)
            .map(|token| {
                if POSITIVE_WORDS.contains(&token.as_str()) {
                    1
                } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                    -1
                } else {
                    0
                }
            })
            .sum()
    }
}

pub fn score(text: &str) -> i32 {
    KeywordScorer.score(text)
}

/// Lowercased tokens split on anything outside `[A-Za-z0-9_]`.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score(""), 0);
        assert_eq!(score("   \n\t"), 0);
    }

    #[test]
    fn repeated_words_count_each_time() {
        assert_eq!(score("happy happy"), 2);
        assert_eq!(score("sad, sad... SAD!"), -3);
    }

    #[test]
    fn positives_and_negatives_cancel() {
        assert_eq!(score("happy sad"), 0);
        assert_eq!(score("I love my job but hate the commute"), 0);
    }

    #[test]
    fn tokenizer_splits_on_punctuation_and_case() {
        let tokens: Vec<String> = tokenize("Great-day, GOOD_vibes!love").collect();
        assert_eq!(tokens, vec!["great", "day", "good_vibes", "love"]);
        assert_eq!(score("Great-day, GOOD_vibes!love"), 2);
    }

    #[test]
    fn unknown_words_contribute_nothing() {
        assert_eq!(score("the quick brown fox"), 0);
        assert_eq!(score("héllo happy"), 1);
    }

    #[test]
    fn lexicons_are_disjoint() {
        for word in POSITIVE_WORDS {
            assert!(!NEGATIVE_WORDS.contains(&word));
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "A wonderful, terrible, excellent day";
        assert_eq!(score(text), score(text));
        assert_eq!(score(text), 1);
    }
}
