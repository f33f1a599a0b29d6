//! Sentence segmentation and word tokenization.
//!
//! Segmentation follows the conventions of a punctuation-driven sentence
//! splitter: a sentence ends after a run of `.`, `!` or `?` (plus any
//! closing quotes or brackets) that is followed by whitespace or the end of
//! the text. Known abbreviations and single-letter initials do not end a
//! sentence.
//!
//! Tokenization splits contractions the way a treebank tokenizer does, so
//! clitics such as `n't` or `'m` become separate, non-alphabetic tokens.

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "jr", "sr", "prof", "sgt", "capt", "lt", "col", "gen", "rev",
    "hon", "mt", "vs", "etc", "inc", "ltd", "vol", "fig", "approx", "dept",
];

/// Abbreviations that only hold before a number ("No. 5").
const NUMERIC_ABBREVIATIONS: &[&str] = &["no"];

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}')
}

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal(chars[i]) {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut end = i;
        while end < chars.len() && is_terminal(chars[end]) {
            end += 1;
        }
        while end < chars.len() && is_closing(chars[end]) {
            end += 1;
        }

        let at_boundary = end >= chars.len() || chars[end].is_whitespace();
        let single_period = chars[run_start] == '.' && end - run_start == 1;
        if at_boundary
            && !(single_period && ends_with_abbreviation(&chars[start..run_start], &chars[end..]))
        {
            push_sentence(&mut sentences, &chars[start..end]);
            start = end;
        }
        i = end;
    }

    if start < chars.len() {
        push_sentence(&mut sentences, &chars[start..]);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn ends_with_abbreviation(preceding: &[char], following: &[char]) -> bool {
    let word: String = preceding
        .iter()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if word.is_empty() {
        return false;
    }
    // Single initials ("J. Smith") are not sentence ends; the pronoun "I" is.
    if word.chars().count() == 1 && word.chars().all(char::is_uppercase) {
        return word != "I";
    }
    let lower = word.to_lowercase();
    if NUMERIC_ABBREVIATIONS.contains(&lower.as_str()) {
        return following
            .iter()
            .find(|c| !c.is_whitespace())
            .is_some_and(|c| c.is_ascii_digit());
    }
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Tokenize text into word tokens, preserving case.
///
/// Chunks are split on every character that is not a letter, digit,
/// apostrophe or hyphen. Contractions are split into stem and clitic:
/// `don't` → `do`, `n't`; `I'm` → `I`, `'m`.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-' || c == '\u{2019}')) {
        let chunk = chunk.trim_matches(|c: char| c == '\'' || c == '-' || c == '\u{2019}');
        if chunk.is_empty() {
            continue;
        }
        split_contraction(chunk, &mut tokens);
    }
    tokens
}

fn split_contraction(chunk: &str, tokens: &mut Vec<String>) {
    let normalized = chunk.replace('\u{2019}', "'");
    let lower = normalized.to_lowercase();

    if lower.ends_with("n't") && normalized.len() > 3 {
        let stem = &normalized[..normalized.len() - 3];
        tokens.push(stem.to_string());
        tokens.push(normalized[normalized.len() - 3..].to_string());
        return;
    }

    match normalized.find('\'') {
        Some(pos) if pos > 0 => {
            tokens.push(normalized[..pos].to_string());
            tokens.push(normalized[pos..].to_string());
        }
        _ => tokens.push(normalized),
    }
}

/// True when every character of the token is alphabetic.
#[inline]
pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Lowercased alphabetic tokens of at least `min_len` characters.
pub fn word_tokens(text: &str, min_len: usize) -> Vec<String> {
    tokenize(&text.to_lowercase())
        .into_iter()
        .filter(|t| is_alphabetic(t) && t.chars().count() >= min_len)
        .collect()
}

/// Number of alphabetic tokens in a sentence, of any length.
pub fn alphabetic_word_count(sentence: &str) -> usize {
    tokenize(sentence).iter().filter(|t| is_alphabetic(t)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_sentences() {
        let sentences = split_sentences("I hate you! Get out now! This is wrong.");
        assert_eq!(sentences, vec!["I hate you!", "Get out now!", "This is wrong."]);
        println!("[PASS] test_split_basic_sentences - {:?}", sentences);
    }

    #[test]
    fn test_split_keeps_abbreviations() {
        let sentences = split_sentences("Mr. Smith went home. Did he?");
        assert_eq!(sentences, vec!["Mr. Smith went home.", "Did he?"]);
    }

    #[test]
    fn test_split_no_and_pronoun_end_sentences() {
        assert_eq!(split_sentences("No. Get out!"), vec!["No.", "Get out!"]);
        assert_eq!(split_sentences("It was I. Then he left."), vec!["It was I.", "Then he left."]);
        assert_eq!(split_sentences("Room No. 5 is locked."), vec!["Room No. 5 is locked."]);
        assert_eq!(split_sentences("J. Smith called."), vec!["J. Smith called."]);
        println!("[PASS] test_split_no_and_pronoun_end_sentences - \"No.\" and \"I.\" close sentences");
    }

    #[test]
    fn test_split_handles_quotes_and_runs() {
        let sentences = split_sentences("\"Run!\" she said. What?! No...");
        assert_eq!(sentences, vec!["\"Run!\"", "she said.", "What?!", "No..."]);
    }

    #[test]
    fn test_split_trailing_text_without_terminal() {
        let sentences = split_sentences("First one. and then nothing");
        assert_eq!(sentences, vec!["First one.", "and then nothing"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_tokenize_contractions() {
        let tokens = tokenize("I don't think I'm wrong");
        assert_eq!(tokens, vec!["I", "do", "n't", "think", "I", "'m", "wrong"]);
        println!("[PASS] test_tokenize_contractions - {:?}", tokens);
    }

    #[test]
    fn test_tokenize_punctuation_and_hyphens() {
        let tokens = tokenize("Well-known, right? 42 times...");
        assert_eq!(tokens, vec!["Well-known", "right", "42", "times"]);
        assert!(!is_alphabetic("Well-known"));
        assert!(!is_alphabetic("42"));
    }

    #[test]
    fn test_word_tokens_filters() {
        let words = word_tokens("I can't see a THING, 3 times!", 2);
        // "i" and "a" are too short, "n't" and "3" are not alphabetic
        assert_eq!(words, vec!["ca", "see", "thing", "times"]);
    }

    #[test]
    fn test_alphabetic_word_count_counts_short_words() {
        assert_eq!(alphabetic_word_count("I hate you!"), 3);
        assert_eq!(alphabetic_word_count("Don't."), 1);
    }
}
