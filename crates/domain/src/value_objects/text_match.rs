//! Fuzzy comparison of free-text guesses against ground truth.
//!
//! Motive and method guesses are typed by the player, so exact string equality is too
//! strict. A guess is graded `Exact` when the normalized text matches, `Partial` when it
//! covers enough of the truth's content words or lands in the same category, and
//! `Incorrect` otherwise.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default share of the truth's content words a guess must cover for `Partial`.
pub const DEFAULT_PARTIAL_THRESHOLD: f64 = 0.5;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "from", "he", "her", "his", "in", "into", "it", "of",
    "on", "or", "she", "so", "the", "their", "them", "they", "to", "was", "were", "with",
];

/// Keyword families used to recognise two differently-worded answers as the same idea.
const CATEGORIES: &[&[&str]] = &[
    // money
    &[
        "money", "inheritance", "inherit", "will", "debt", "greed", "fortune", "insurance",
        "wealth", "estate", "embezzlement", "embezzle",
    ],
    // revenge
    &["revenge", "vengeance", "grudge", "betrayal", "betrayed", "humiliation"],
    // passion
    &["jealousy", "jealous", "affair", "love", "lover", "romance", "rival"],
    // secrets
    &["blackmail", "secret", "scandal", "exposure", "exposed", "silence", "cover"],
    // poison
    &["poison", "poisoned", "arsenic", "cyanide", "toxin", "laced", "hemlock", "digitalis"],
    // strangling
    &["rope", "strangled", "strangle", "strangulation", "garrote", "choked", "cord"],
    // blades
    &["knife", "stabbed", "stab", "dagger", "blade", "letter opener"],
    // blunt force
    &["candlestick", "bludgeon", "bludgeoned", "struck", "blunt", "wrench", "pipe", "bust"],
    // firearms
    &["gun", "shot", "revolver", "pistol", "rifle", "shotgun"],
    // falls and pushes
    &["pushed", "push", "fall", "fell", "balcony", "stairs", "cliff"],
];

/// Grade of a single field of an accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchGrade {
    Exact,
    Partial,
    Incorrect,
}

impl MatchGrade {
    /// `Exact` or `Partial`.
    pub fn is_match(self) -> bool {
        !matches!(self, Self::Incorrect)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
            Self::Incorrect => "incorrect",
        }
    }
}

/// Lowercase, strip punctuation and collapse whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn stem(word: &str) -> &str {
    if word.len() > 4 {
        if let Some(stripped) = word.strip_suffix("ing") {
            return stripped;
        }
        if let Some(stripped) = word.strip_suffix("ed") {
            return stripped;
        }
    }
    if word.len() > 3 {
        if let Some(stripped) = word.strip_suffix('s') {
            return stripped;
        }
    }
    word
}

fn content_words(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split(' ')
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(|w| stem(w).to_string())
        .collect()
}

fn categories_of(normalized: &str) -> BTreeSet<usize> {
    let words: BTreeSet<&str> = normalized.split(' ').collect();
    CATEGORIES
        .iter()
        .enumerate()
        .filter(|(_, keywords)| {
            keywords.iter().any(|kw| {
                if kw.contains(' ') {
                    normalized.contains(kw)
                } else {
                    words.contains(kw)
                }
            })
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Share of the truth's content words that also appear in the guess (0.0 - 1.0).
pub fn overlap_ratio(guess: &str, truth: &str) -> f64 {
    let truth_words = content_words(truth);
    if truth_words.is_empty() {
        return 0.0;
    }
    let guess_words = content_words(guess);
    let shared = truth_words.intersection(&guess_words).count();
    shared as f64 / truth_words.len() as f64
}

/// Grade a free-text guess against the ground truth.
pub fn grade_text(guess: &str, truth: &str, partial_threshold: f64) -> MatchGrade {
    let guess_norm = normalize(guess);
    let truth_norm = normalize(truth);
    if guess_norm.is_empty() {
        return MatchGrade::Incorrect;
    }
    if guess_norm == truth_norm {
        return MatchGrade::Exact;
    }
    if overlap_ratio(guess, truth) >= partial_threshold {
        return MatchGrade::Partial;
    }
    let truth_categories = categories_of(&truth_norm);
    if !truth_categories.is_disjoint(&categories_of(&guess_norm)) {
        return MatchGrade::Partial;
    }
    MatchGrade::Incorrect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Poisoned the TEA!  "), "poisoned the tea");
    }

    #[test]
    fn identical_text_is_exact() {
        assert_eq!(
            grade_text("Strangled with a rope", "strangled with a rope.", 0.5),
            MatchGrade::Exact
        );
    }

    #[test]
    fn word_overlap_is_partial() {
        assert_eq!(
            grade_text(
                "to claim the inheritance",
                "to secure the inheritance before the will changed",
                0.3
            ),
            MatchGrade::Partial
        );
    }

    #[test]
    fn shared_category_is_partial() {
        assert_eq!(
            grade_text("arsenic in the wine", "poisoned his brandy", 0.5),
            MatchGrade::Partial
        );
        assert_eq!(
            grade_text("she was jealous", "a secret love affair", 0.5),
            MatchGrade::Partial
        );
    }

    #[test]
    fn unrelated_guess_is_incorrect() {
        assert_eq!(
            grade_text("shot with a revolver", "strangled with a rope", 0.5),
            MatchGrade::Incorrect
        );
        assert_eq!(grade_text("   ", "anything", 0.5), MatchGrade::Incorrect);
    }

    #[test]
    fn overlap_ignores_stop_words_and_plurals() {
        let ratio = overlap_ratio("ropes", "the rope");
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }
}
