//! Coarse part-of-speech tagging.

use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Coarse word class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl PosTag {
    /// Noun, verb and adjective tokens are keyword candidates.
    #[inline]
    pub fn is_content(self) -> bool {
        matches!(self, Self::Noun | Self::Verb | Self::Adjective)
    }
}

/// Part-of-speech backend.
///
/// Implementations must return exactly one tag per input token.
pub trait PosTagger: Send + Sync {
    fn name(&self) -> &str;

    /// Tag lowercase word tokens in sentence order.
    fn tag(&self, tokens: &[String]) -> Result<Vec<PosTag>, BackendError>;
}

const FUNCTION_WORDS: &[&str] = &[
    // determiners and pronouns
    "the", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "me", "him", "us", "them", "it", "you", "he", "she", "we", "they", "mine", "yours",
    "hers", "ours", "theirs", "myself", "yourself", "himself", "herself", "itself", "ourselves",
    "themselves", "who", "whom", "whose", "which", "what", "some", "any", "every", "each", "no",
    "all", "both", "either", "neither", "another", "other", "such", "much", "many", "few",
    "several", "somebody", "someone", "something", "anybody", "anyone", "anything", "nobody",
    "everyone", "everybody", "everything", "nothing",
    // prepositions and particles
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down", "out",
    "off", "over", "under", "around", "across", "behind", "beyond", "near", "toward", "towards",
    "upon", "within", "without", "like", "than", "since", "until", "till", "via",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "because", "although", "though", "while",
    "whether", "unless", "whereas",
    // interjections
    "oh", "ah", "hey", "uh", "um", "yeah", "okay", "ok", "hello", "hi", "bye", "yes",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "having", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "ca", "wo", "sha", "ai",
];

const COMMON_VERBS: &[&str] = &[
    "get", "got", "go", "went", "gone", "come", "came", "make", "made", "take", "took", "taken",
    "see", "saw", "seen", "know", "knew", "known", "think", "thought", "want", "need", "say",
    "said", "tell", "told", "give", "gave", "given", "find", "found", "feel", "felt", "let",
    "keep", "kept", "leave", "left", "put", "run", "ran", "hate", "love", "like", "kill",
    "help", "try", "look", "hear", "heard", "believe", "understand", "remember", "forget",
    "stop", "stay", "wait", "listen", "talk", "ask", "call", "die", "live", "fight", "win",
    "lose", "lost", "trust", "hope", "mean", "meant", "bring", "brought", "buy", "bought",
    "hold", "held", "sit", "sat", "stand", "stood", "lie", "eat", "ate", "drink", "sleep",
    "work", "play", "move", "turn", "start", "begin", "began", "end", "shut", "hurt", "kiss",
    "promise", "care", "fear", "protect", "save", "destroy", "control", "obey", "follow",
];

const COMMON_ADVERBS: &[&str] = &[
    "not", "never", "always", "now", "then", "here", "there", "very", "too", "also", "just",
    "only", "still", "already", "again", "ever", "soon", "often", "sometimes", "maybe",
    "perhaps", "almost", "quite", "rather", "really", "well", "away", "back", "together",
    "once", "today", "tonight", "tomorrow", "yesterday", "why", "how", "when", "where", "n't",
    "even", "anyway", "instead", "please", "enough",
];

const COMMON_ADJECTIVES: &[&str] = &[
    "good", "bad", "great", "big", "small", "little", "old", "new", "young", "long", "short",
    "high", "low", "right", "wrong", "true", "false", "sure", "real", "nice", "fine", "happy",
    "sad", "angry", "mad", "dead", "alive", "afraid", "strong", "weak", "free", "safe", "best",
    "better", "worse", "worst", "own", "same", "different", "last", "next", "first", "whole",
    "stupid", "crazy", "sorry", "ready", "easy", "hard", "dark", "cold", "hot", "warm", "kind",
    "calm", "sick", "poor", "rich", "clear", "certain", "possible", "important", "beautiful",
];

const VERB_TRIGGERS: &[&str] = &[
    "i", "you", "we", "they", "he", "she", "to", "will", "would", "can", "could", "should",
    "must", "might", "may", "shall", "do", "does", "did", "n't", "not", "never", "ca", "wo",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ic", "ary", "ant", "ent",
];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ness", "ment", "ity", "ism", "ist", "ship", "hood", "ance", "ence", "er",
    "or", "age", "dom",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ate", "en"];

/// Closed-class word lists plus suffix rules; unknown words default to noun.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPosTagger;

impl HeuristicPosTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_word(word: &str, previous: Option<&str>) -> PosTag {
        if FUNCTION_WORDS.contains(&word) {
            return PosTag::Other;
        }
        if AUXILIARIES.contains(&word) {
            return PosTag::Verb;
        }
        if COMMON_ADVERBS.contains(&word) {
            return PosTag::Adverb;
        }
        if COMMON_ADJECTIVES.contains(&word) {
            return PosTag::Adjective;
        }
        if COMMON_VERBS.contains(&word) {
            return PosTag::Verb;
        }

        let long_enough = word.chars().count() > 4;
        if long_enough && word.ends_with("ly") {
            return PosTag::Adverb;
        }
        if long_enough && (word.ends_with("ing") || word.ends_with("ed")) {
            return PosTag::Verb;
        }
        if previous.is_some_and(|p| VERB_TRIGGERS.contains(&p)) {
            return PosTag::Verb;
        }
        if long_enough {
            if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
                return PosTag::Noun;
            }
            if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
                return PosTag::Adjective;
            }
            if VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
                return PosTag::Verb;
            }
        }
        PosTag::Noun
    }
}

impl PosTagger for HeuristicPosTagger {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn tag(&self, tokens: &[String]) -> Result<Vec<PosTag>, BackendError> {
        Ok(tokens
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let previous = i.checked_sub(1).map(|p| tokens[p].as_str());
                Self::tag_word(word, previous)
            })
            .collect())
    }
}
