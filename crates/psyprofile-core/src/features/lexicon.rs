//! Psycholinguistic word-stem lexicon.
//!
//! Each category is a list of word stems. A word matches a category when its
//! lowercase form starts with any stem of that category (e.g. "destroyed"
//! matches the stem "destro"). Categories are not exclusive: one word may
//! count towards several of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

const STANDARD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "positive_emotion",
        &[
            "love", "nice", "sweet", "happy", "good", "great", "fine", "hope", "beauti", "enjoy",
            "wonder", "excellen", "perfect", "best", "better", "amaz", "safe", "trust", "care",
            "kind", "warm", "bright", "calm", "peace", "friend", "laugh", "smile", "pleas",
            "thank", "grate",
        ],
    ),
    (
        "negative_emotion",
        &[
            "hate", "bad", "wrong", "ugly", "stupid", "terrib", "horrib", "awful", "worst",
            "worse", "kill", "die", "dead", "death", "hurt", "pain", "damn", "hell", "sick",
            "dark", "cold", "fear", "angry", "sad", "scare", "danger", "threat", "suffer",
            "misera", "cruel",
        ],
    ),
    (
        "anger",
        &[
            "hate", "kill", "fight", "angry", "rage", "fury", "mad", "damn", "hell", "bastard",
            "stupid", "idiot", "fool", "shut", "destroy", "attack", "threat", "scream", "punch",
            "smash", "crush", "bitch",
        ],
    ),
    (
        "anxiety",
        &[
            "worr", "fear", "afraid", "scare", "nervous", "panic", "danger", "threat", "risk",
            "careful", "trouble", "alarm", "dread", "terror", "tense", "anxious", "uneasy",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "cry", "tear", "alone", "lonely", "lost", "miss", "sorry", "regret", "grief",
            "mourn", "depress", "empty", "broken", "hopeless", "disappoint", "abandon",
        ],
    ),
    (
        "social",
        &[
            "we", "us", "our", "friend", "partner", "team", "together", "people", "family",
            "group", "trust", "help", "share", "join", "talk", "tell", "ask", "said", "listen",
            "meet",
        ],
    ),
    (
        "cognitive",
        &[
            "think", "know", "believe", "understand", "realiz", "wonder", "suppose", "guess",
            "figure", "reason", "logic", "consider", "analyz", "decide", "remember", "forget",
            "learn", "meaning", "cause", "because", "maybe", "perhaps",
        ],
    ),
    (
        "power",
        &[
            "control", "command", "order", "force", "power", "authorit", "demand", "boss", "lead",
            "rule", "dominat", "strong", "weapon", "gun", "fight", "obey", "submit", "weak",
        ],
    ),
    (
        "achievement",
        &[
            "win", "success", "accomplish", "achiev", "earn", "gain", "best", "work", "goal",
            "finish", "complet", "mission", "target", "done", "built", "made", "creat",
        ],
    ),
    (
        "risk_danger",
        &[
            "danger", "risk", "threat", "fire", "gun", "weapon", "fight", "kill", "damage",
            "destroy", "crash", "explos", "attack", "escape", "chase", "run", "shoot", "blood",
            "wound", "bullet",
        ],
    ),
    (
        "certainty",
        &[
            "always", "never", "absolute", "certain", "definit", "sure", "exact", "clearly",
            "obvious", "undoubt", "complet", "total",
        ],
    ),
    (
        "tentativeness",
        &[
            "maybe", "perhaps", "might", "could", "possibly", "sometimes", "almost", "somewhat",
            "seem", "appear", "sort of", "kind of", "guess", "suppose", "probably",
        ],
    ),
];

/// A set of named word-stem categories.
///
/// Categories are kept sorted by name, which is the order they occupy at the
/// tail of every feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    categories: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    /// Build a lexicon from explicit categories.
    ///
    /// # Errors
    /// Returns `ValidationError` if there are no categories, a category name
    /// is empty, or a category has no stems.
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> CoreResult<Self> {
        if categories.is_empty() {
            return Err(CoreError::validation("lexicon", "at least one category is required"));
        }
        for (name, stems) in &categories {
            if name.trim().is_empty() {
                return Err(CoreError::validation("lexicon", "category names must not be empty"));
            }
            if stems.is_empty() {
                return Err(CoreError::validation(
                    "lexicon",
                    format!("category '{}' has no stems", name),
                ));
            }
        }
        let categories = categories
            .into_iter()
            .map(|(name, stems)| (name, stems.into_iter().map(|s| s.to_lowercase()).collect()))
            .collect();
        Ok(Self { categories })
    }

    /// The built-in twelve-category lexicon.
    pub fn standard() -> Self {
        let categories = STANDARD_CATEGORIES
            .iter()
            .map(|(name, stems)| {
                (
                    name.to_string(),
                    stems.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }

    /// Category names in alphabetical order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Stems of one category.
    pub fn stems(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Fraction of `words` matching each category.
    ///
    /// `words` are expected in lowercase. Every category appears in the
    /// result; an empty word list scores 0 everywhere.
    pub fn score(&self, words: &[String]) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .map(|(name, stems)| {
                let score = if words.is_empty() {
                    0.0
                } else {
                    let matches = words
                        .iter()
                        .filter(|w| stems.iter().any(|stem| w.starts_with(stem.as_str())))
                        .count();
                    matches as f64 / words.len() as f64
                };
                (name.clone(), score)
            })
            .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_standard_has_twelve_sorted_categories() {
        let lexicon = Lexicon::standard();
        let names: Vec<&str> = lexicon.category_names().collect();
        assert_eq!(names.len(), 12);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "achievement");
        assert_eq!(names[11], "tentativeness");
        println!("[PASS] test_standard_has_twelve_sorted_categories - {:?}", names);
    }

    #[test]
    fn test_prefix_matching() {
        let lexicon = Lexicon::standard();
        let scores = lexicon.score(&words(&["destroyed", "calmly", "table", "tree"]));
        // "destroyed" matches anger + risk_danger via "destroy"
        assert!((scores["anger"] - 0.25).abs() < 1e-12);
        assert!((scores["risk_danger"] - 0.25).abs() < 1e-12);
        assert!((scores["positive_emotion"] - 0.25).abs() < 1e-12);
        assert_eq!(scores["power"], 0.0);
    }

    #[test]
    fn test_word_counts_in_multiple_categories() {
        let lexicon = Lexicon::standard();
        let scores = lexicon.score(&words(&["hate", "wrong"]));
        assert!((scores["negative_emotion"] - 1.0).abs() < 1e-12);
        assert!((scores["anger"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_words_score_zero() {
        let lexicon = Lexicon::standard();
        let scores = lexicon.score(&[]);
        assert_eq!(scores.len(), 12);
        assert!(scores.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_custom_lexicon_validation() {
        assert!(Lexicon::new(BTreeMap::new()).is_err());

        let mut categories = BTreeMap::new();
        categories.insert("humor".to_string(), vec![]);
        assert!(Lexicon::new(categories).is_err());

        let mut categories = BTreeMap::new();
        categories.insert("humor".to_string(), vec!["JOK".to_string(), "laugh".to_string()]);
        let lexicon = Lexicon::new(categories).expect("valid lexicon");
        assert_eq!(lexicon.stems("humor").unwrap()[0], "jok");
    }
}
