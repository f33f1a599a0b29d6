//! Lemmatization of content words for keyword ranking.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::pos::PosTag;
use crate::error::BackendError;

/// Lemmatization backend.
pub trait Lemmatizer: Send + Sync {
    fn name(&self) -> &str;

    /// Base form of a lowercase `word` used as `tag`.
    fn lemmatize(&self, word: &str, tag: PosTag) -> Result<String, BackendError>;
}

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
    ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("does", "do"),
    ("did", "do"), ("done", "do"), ("went", "go"), ("gone", "go"), ("goes", "go"),
    ("got", "get"), ("gotten", "get"), ("made", "make"), ("said", "say"), ("took", "take"),
    ("taken", "take"), ("saw", "see"), ("seen", "see"), ("knew", "know"), ("known", "know"),
    ("thought", "think"), ("told", "tell"), ("gave", "give"), ("given", "give"),
    ("found", "find"), ("felt", "feel"), ("left", "leave"), ("kept", "keep"), ("came", "come"),
    ("ran", "run"), ("brought", "bring"), ("bought", "buy"), ("held", "hold"), ("sat", "sit"),
    ("stood", "stand"), ("ate", "eat"), ("eaten", "eat"), ("began", "begin"),
    ("begun", "begin"), ("meant", "mean"), ("heard", "hear"), ("lost", "lose"), ("won", "win"),
    ("spoke", "speak"), ("spoken", "speak"), ("wrote", "write"), ("written", "write"),
    ("fought", "fight"), ("taught", "teach"), ("caught", "catch"), ("died", "die"),
    ("lied", "lie"), ("tied", "tie"), ("paid", "pay"), ("built", "build"), ("sent", "send"),
    ("spent", "spend"), ("understood", "understand"), ("forgot", "forget"),
    ("forgotten", "forget"), ("used", "use"), ("broke", "break"), ("broken", "break"),
    ("chose", "choose"), ("chosen", "choose"), ("drove", "drive"), ("driven", "drive"),
    ("fell", "fall"), ("fallen", "fall"), ("flew", "fly"), ("flown", "fly"),
    ("grew", "grow"), ("grown", "grow"), ("hid", "hide"), ("hidden", "hide"),
    ("led", "lead"), ("met", "meet"), ("rode", "ride"), ("rose", "rise"), ("shot", "shoot"),
    ("slept", "sleep"), ("stole", "steal"), ("stolen", "steal"), ("struck", "strike"),
    ("swore", "swear"), ("sworn", "swear"), ("threw", "throw"), ("thrown", "throw"),
    ("woke", "wake"), ("wore", "wear"), ("worn", "wear"),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("feet", "foot"),
    ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("lives", "life"),
    ("wives", "wife"), ("knives", "knife"), ("selves", "self"), ("wolves", "wolf"),
    ("halves", "half"), ("leaves", "leaf"), ("thieves", "thief"),
];

const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("further", "far"), ("farther", "far"), ("less", "little"), ("least", "little"),
    ("more", "much"), ("most", "much"),
];

static VERBS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_VERBS.iter().copied().collect());
static NOUNS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_NOUNS.iter().copied().collect());
static ADJECTIVES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_ADJECTIVES.iter().copied().collect());

/// Suffix rules backed by irregular-form tables.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn noun(word: &str) -> String {
        if let Some(lemma) = NOUNS.get(word) {
            return lemma.to_string();
        }
        let len = word.len();
        if len <= 3 || word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..len - 3]);
        }
        for suffix in ["sses", "shes", "ches", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..len - 2].to_string();
            }
        }
        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }

    fn verb(word: &str) -> String {
        if let Some(lemma) = VERBS.get(word) {
            return lemma.to_string();
        }
        let len = word.len();
        if len <= 3 {
            return word.to_string();
        }
        if len > 4 && (word.ends_with("ies") || word.ends_with("ied")) {
            return format!("{}y", &word[..len - 3]);
        }
        if word.ends_with("eed") && len > 4 {
            return word[..len - 1].to_string();
        }
        if len > 4 {
            for suffix in ["ing", "ed"] {
                if let Some(stem) = word.strip_suffix(suffix) {
                    if stem.len() >= 2 && stem.chars().any(is_vowel) {
                        return restore_stem(stem);
                    }
                    return word.to_string();
                }
            }
        }
        for suffix in ["sses", "shes", "ches", "xes", "zes", "oes"] {
            if word.ends_with(suffix) {
                return word[..len - 2].to_string();
            }
        }
        if word.ends_with("ss") || word.ends_with("us") {
            return word.to_string();
        }
        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }

    fn adjective(word: &str) -> String {
        if let Some(lemma) = ADJECTIVES.get(word) {
            return lemma.to_string();
        }
        let len = word.len();
        if len > 5 && word.ends_with("iest") {
            return format!("{}y", &word[..len - 4]);
        }
        if len > 4 && word.ends_with("ier") {
            return format!("{}y", &word[..len - 3]);
        }
        word.to_string()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn name(&self) -> &str {
        "rules"
    }

    fn lemmatize(&self, word: &str, tag: PosTag) -> Result<String, BackendError> {
        if !word.is_ascii() {
            return Ok(word.to_string());
        }
        Ok(match tag {
            PosTag::Noun => Self::noun(word),
            PosTag::Verb => Self::verb(word),
            PosTag::Adjective => Self::adjective(word),
            PosTag::Adverb | PosTag::Other => word.to_string(),
        })
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Undo consonant doubling ("stopp" → "stop") or restore a dropped final
/// "e" ("hat" → "hate", "lov" → "love").
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let last = chars[n - 1];

    if n >= 3 && chars[n - 2] == last && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
        return chars[..n - 1].iter().collect();
    }
    if matches!(last, 'v' | 'z') || (last == 'c' && n >= 3) {
        return format!("{}e", stem);
    }
    let cvc = n == 3
        && !is_vowel(chars[0])
        && is_vowel(chars[1])
        && !is_vowel(last)
        && !matches!(last, 'w' | 'x' | 'y');
    if cvc {
        return format!("{}e", stem);
    }
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str, tag: PosTag) -> String {
        RuleLemmatizer::new().lemmatize(word, tag).expect("rule lemmatizer is infallible")
    }

    #[test]
    fn test_noun_plurals() {
        assert_eq!(lemma("dogs", PosTag::Noun), "dog");
        assert_eq!(lemma("stories", PosTag::Noun), "story");
        assert_eq!(lemma("boxes", PosTag::Noun), "box");
        assert_eq!(lemma("churches", PosTag::Noun), "church");
        assert_eq!(lemma("glass", PosTag::Noun), "glass");
        assert_eq!(lemma("children", PosTag::Noun), "child");
        assert_eq!(lemma("wolves", PosTag::Noun), "wolf");
        println!("[PASS] test_noun_plurals");
    }

    #[test]
    fn test_verb_forms() {
        assert_eq!(lemma("went", PosTag::Verb), "go");
        assert_eq!(lemma("running", PosTag::Verb), "run");
        assert_eq!(lemma("stopped", PosTag::Verb), "stop");
        assert_eq!(lemma("hated", PosTag::Verb), "hate");
        assert_eq!(lemma("loved", PosTag::Verb), "love");
        assert_eq!(lemma("coming", PosTag::Verb), "come");
        assert_eq!(lemma("walked", PosTag::Verb), "walk");
        assert_eq!(lemma("killing", PosTag::Verb), "kill");
        assert_eq!(lemma("tried", PosTag::Verb), "try");
        assert_eq!(lemma("agreed", PosTag::Verb), "agree");
        assert_eq!(lemma("hates", PosTag::Verb), "hate");
        assert_eq!(lemma("bring", PosTag::Verb), "bring");
    }

    #[test]
    fn test_adjectives_and_others() {
        assert_eq!(lemma("better", PosTag::Adjective), "good");
        assert_eq!(lemma("happier", PosTag::Adjective), "happy");
        assert_eq!(lemma("clever", PosTag::Adjective), "clever");
        assert_eq!(lemma("quickly", PosTag::Adverb), "quickly");
    }
}
