//! Sentence-level valence scoring.
//!
//! The default analyzer is a lexicon-and-rule scorer in the VADER family:
//! word valences from a fixed lexicon, adjusted by boosters, negation,
//! capitalization, a contrastive "but" and punctuation emphasis, then
//! normalized into a compound score in [-1, 1].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Valence scores of one sentence or their average over a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Overall valence in [-1, 1]
    pub compound: f64,
}

/// Sentence valence backend.
pub trait SentimentAnalyzer: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Score one sentence.
    fn polarity_scores(&self, sentence: &str) -> Result<SentimentScores, BackendError>;
}

/// Empirically derived increment for booster words.
const BOOSTER_INCR: f64 = 0.293;
const BOOSTER_DECR: f64 = -0.293;
/// Increment for an ALL-CAPS sentiment word among mixed-case text.
const CAPS_INCR: f64 = 0.733;
/// Scalar applied to a negated valence.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant approximating the maximum expected sum.
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_EMPHASIS: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_EMPHASIS: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't", "rarely",
    "seldom", "despite",
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously", "fully",
    "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "unbelievably", "unusually", "utterly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat", "sorta",
];

const VALENCE: &[(&str, f64)] = &[
    ("abandon", -1.9), ("abandoned", -2.0), ("abuse", -3.2), ("accept", 1.6),
    ("accident", -2.1), ("admire", 2.1), ("adore", 2.6), ("afraid", -2.2),
    ("agony", -3.2), ("agree", 1.5), ("alive", 1.6), ("alone", -1.0),
    ("amazing", 2.8), ("anger", -2.7), ("angry", -2.3), ("annoyed", -1.6),
    ("anxious", -1.0), ("apologize", 0.4), ("ashamed", -2.1), ("attack", -2.1),
    ("awesome", 3.1), ("awful", -2.0), ("bad", -2.5), ("bastard", -2.5),
    ("beautiful", 2.9), ("best", 3.2), ("betray", -3.2), ("better", 1.9),
    ("bitch", -2.8), ("bitter", -1.8), ("blame", -1.4), ("bless", 1.8),
    ("blood", -1.3), ("bored", -1.1), ("brave", 2.4), ("broken", -2.1),
    ("brutal", -3.1), ("calm", 1.3), ("care", 2.2), ("careful", 0.6),
    ("charming", 2.8), ("cheer", 2.3), ("clever", 2.0), ("comfort", 1.5),
    ("confident", 2.2), ("confused", -1.3), ("cool", 1.3), ("courage", 2.2),
    ("coward", -2.0), ("crap", -1.6), ("crazy", -1.4), ("cruel", -2.8),
    ("cry", -2.1), ("damn", -1.7), ("danger", -2.4), ("dangerous", -2.1),
    ("dead", -3.3), ("death", -2.9), ("defeat", -2.0), ("delight", 2.9),
    ("depressed", -2.3), ("desperate", -1.3), ("destroy", -2.5), ("die", -2.9),
    ("disappointed", -1.9), ("disaster", -3.1), ("disgusting", -2.4), ("doubt", -1.5),
    ("dread", -2.4), ("dumb", -2.3), ("eager", 1.5), ("easy", 1.9),
    ("enemy", -2.5), ("enjoy", 2.2), ("evil", -3.4), ("excellent", 2.7),
    ("excited", 2.4), ("fail", -2.5), ("failure", -2.3), ("fair", 1.3),
    ("faith", 1.8), ("fake", -2.1), ("fantastic", 2.6), ("fear", -2.2),
    ("fight", -1.6), ("fine", 0.8), ("fool", -1.9), ("forgive", 1.9),
    ("free", 2.3), ("freedom", 3.2), ("friend", 2.2), ("friendly", 2.2),
    ("fun", 2.3), ("funny", 1.9), ("furious", -2.7), ("gentle", 1.9),
    ("glad", 2.0), ("glory", 2.3), ("good", 1.9), ("grateful", 2.0),
    ("great", 3.1), ("grief", -2.2), ("guilty", -1.8), ("happy", 2.7),
    ("harm", -2.5), ("hate", -2.7), ("hated", -3.2), ("hatred", -3.2),
    ("heal", 1.4), ("hell", -3.6), ("help", 1.7), ("hero", 2.6),
    ("honest", 2.3), ("honor", 2.2), ("hope", 1.9), ("hopeless", -2.0),
    ("horrible", -2.5), ("hostile", -1.6), ("hug", 2.1), ("hurt", -2.4),
    ("idiot", -2.3), ("ignorant", -1.1), ("ill", -1.8), ("important", 0.8),
    ("insane", -1.7), ("insult", -2.3), ("interesting", 1.7), ("jealous", -2.0),
    ("joke", 1.2), ("joy", 2.8), ("kill", -3.7), ("killed", -3.5),
    ("kind", 2.4), ("kiss", 1.8), ("laugh", 2.6), ("liar", -3.1),
    ("lie", -1.6), ("like", 2.0), ("lonely", -1.5), ("lose", -1.6),
    ("loser", -2.4), ("lost", -1.3), ("love", 3.2), ("loved", 2.9),
    ("lovely", 2.8), ("loyal", 2.1), ("lucky", 1.8), ("mad", -2.2),
    ("mess", -1.5), ("miserable", -2.2), ("miss", -0.6), ("mistake", -1.4),
    ("murder", -3.7), ("nasty", -2.6), ("nice", 1.8), ("pain", -2.3),
    ("panic", -2.3), ("pathetic", -2.7), ("peace", 2.5), ("perfect", 2.7),
    ("pity", -1.2), ("please", 1.3), ("pleasure", 2.7), ("poor", -2.1),
    ("pretty", 2.2), ("pride", 1.4), ("problem", -1.7), ("protect", 1.3),
    ("proud", 2.1), ("punish", -2.4), ("rage", -2.6), ("regret", -1.8),
    ("relax", 1.9), ("relief", 2.1), ("respect", 2.1), ("rich", 2.6),
    ("right", 0.7), ("rude", -2.0), ("ruin", -2.8), ("sad", -2.1),
    ("safe", 1.9), ("scared", -1.9), ("scream", -1.7), ("shame", -2.1),
    ("shit", -2.6), ("shut", -0.8), ("sick", -2.3), ("smart", 1.7),
    ("smile", 1.5), ("sorry", -0.3), ("strong", 2.3), ("stupid", -2.4),
    ("success", 2.7), ("suffer", -2.5), ("super", 2.9), ("support", 1.7),
    ("sure", 1.3), ("sweet", 2.0), ("terrible", -2.1), ("terrified", -3.0),
    ("thank", 1.5), ("thanks", 1.9), ("threat", -2.4), ("tired", -1.9),
    ("torture", -2.9), ("trouble", -1.7), ("true", 1.8), ("trust", 2.3),
    ("truth", 1.3), ("ugly", -2.3), ("unfair", -2.1), ("unhappy", -1.8),
    ("upset", -1.6), ("useless", -1.8), ("victory", 2.8), ("violent", -2.9),
    ("war", -2.9), ("warm", 0.9), ("weak", -1.9), ("welcome", 2.0),
    ("win", 2.8), ("wise", 1.8), ("wonderful", 2.7), ("worried", -1.2),
    ("worry", -1.9), ("worse", -2.1), ("worst", -3.1), ("worth", 0.9),
    ("wow", 2.8), ("wrong", -2.1), ("yes", 1.7),
];

static VALENCE_LEXICON: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| VALENCE.iter().copied().collect());

/// Default lexicon-and-rule sentiment analyzer.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentimentAnalyzer;

impl LexiconSentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn valence(word: &str) -> Option<f64> {
        VALENCE_LEXICON.get(word).copied()
    }

    fn booster(word: &str) -> Option<f64> {
        if BOOSTERS_UP.contains(&word) {
            Some(BOOSTER_INCR)
        } else if BOOSTERS_DOWN.contains(&word) {
            Some(BOOSTER_DECR)
        } else {
            None
        }
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word) || word.contains("n't")
    }

    fn booster_scalar(word: &str, lower: &str, valence: f64, caps_differ: bool) -> f64 {
        let Some(mut scalar) = Self::booster(lower) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if caps_differ && is_all_caps(word) {
            scalar += if valence > 0.0 { CAPS_INCR } else { -CAPS_INCR };
        }
        scalar
    }

    /// Valence of token `i`, adjusted for the three preceding tokens.
    fn token_valence(words: &[&str], lower: &[String], i: usize, caps_differ: bool) -> f64 {
        let Some(mut valence) = Self::valence(&lower[i]) else {
            return 0.0;
        };

        if caps_differ && is_all_caps(words[i]) {
            valence += if valence > 0.0 { CAPS_INCR } else { -CAPS_INCR };
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let j = i - distance;
            if Self::valence(&lower[j]).is_some() {
                continue;
            }
            let mut scalar = Self::booster_scalar(words[j], &lower[j], valence, caps_differ);
            match distance {
                2 => scalar *= 0.95,
                3 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;

            if Self::is_negation(&lower[j]) {
                // "never so good" intensifies rather than negates
                let intensified = distance > 1
                    && lower[j] == "never"
                    && matches!(lower[i - 1].as_str(), "so" | "this");
                valence *= if intensified { 1.25 } else { NEGATION_SCALAR };
            }
        }

        valence
    }
}

impl SentimentAnalyzer for LexiconSentimentAnalyzer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity_scores(&self, sentence: &str) -> Result<SentimentScores, BackendError> {
        let words: Vec<&str> = sentence
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\''))
            .map(|w| w.trim_matches('\''))
            .filter(|w| w.chars().count() > 1)
            .collect();

        if words.is_empty() {
            return Ok(SentimentScores::default());
        }

        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let caps_count = words.iter().filter(|w| is_all_caps(w)).count();
        let caps_differ = caps_count > 0 && caps_count < words.len();

        let mut sentiments: Vec<f64> = (0..words.len())
            .map(|i| {
                if Self::booster(&lower[i]).is_some() {
                    0.0
                } else {
                    Self::token_valence(&words, &lower, i, caps_differ)
                }
            })
            .collect();

        // Contrastive "but": dampen what precedes, emphasize what follows.
        if let Some(but_idx) = lower.iter().position(|w| w == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but_idx {
                    *s *= 0.5;
                } else if i > but_idx {
                    *s *= 1.5;
                }
            }
        }

        Ok(score_valences(&sentiments, punctuation_emphasis(sentence)))
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn punctuation_emphasis(sentence: &str) -> f64 {
    let exclamations = sentence.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = sentence.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_EMPHASIS,
        _ => MAX_QUESTION_EMPHASIS,
    };
    exclamations as f64 * EXCLAMATION_EMPHASIS + question_emphasis
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valences(sentiments: &[f64], emphasis: f64) -> SentimentScores {
    if sentiments.iter().all(|&s| s == 0.0) {
        return SentimentScores {
            neutral: 1.0,
            ..Default::default()
        };
    }

    // Opposing valences that cancel still yield pos/neg shares; only the
    // compound is zero.
    let sum: f64 = sentiments.iter().sum();
    let compound = if sum > 0.0 {
        normalize(sum + emphasis)
    } else if sum < 0.0 {
        normalize(sum - emphasis)
    } else {
        0.0
    };

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neutral_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neutral_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neutral_count;
    SentimentScores {
        positive: (pos_sum / total).abs(),
        negative: (neg_sum / total).abs(),
        neutral: (neutral_count / total).abs(),
        compound,
    }
}
