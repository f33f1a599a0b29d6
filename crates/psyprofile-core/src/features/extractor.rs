//! Dialogue → [`MetricVector`] extraction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::lemma::{Lemmatizer, RuleLemmatizer};
use super::lexicon::Lexicon;
use super::metrics::{
    DialogueMetrics, LexicalMetrics, MetricVector, PosDistribution, SyntacticMetrics,
};
use super::pos::{HeuristicPosTagger, PosTag, PosTagger};
use super::schema::FeatureSchema;
use super::sentiment::{LexiconSentimentAnalyzer, SentimentAnalyzer, SentimentScores};
use super::stopwords::is_stop_word;
use super::text::{alphabetic_word_count, split_sentences, word_tokens};
use crate::config::constants::features::{
    FRAGMENT_WORDS, MIN_KEYWORD_LEN, MIN_TOKEN_LEN, NO_DIALOGUE_WARNING,
};
use crate::config::FeatureConfig;

/// Converts a character's dialogue lines into a metric vector.
///
/// The extractor holds no mutable state; one instance can serve any number
/// of characters concurrently. Analysis backends are injected with the
/// `with_*` builders and default to the rule-based implementations.
#[derive(Clone)]
pub struct FeatureExtractor {
    config: FeatureConfig,
    lexicon: Arc<Lexicon>,
    schema: Arc<FeatureSchema>,
    sentiment: Arc<dyn SentimentAnalyzer>,
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("config", &self.config)
            .field("features", &self.schema.len())
            .field("sentiment", &self.sentiment.name())
            .field("tagger", &self.tagger.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl FeatureExtractor {
    /// Extractor with the standard lexicon and default backends.
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            config,
            lexicon: Arc::new(Lexicon::standard()),
            schema: FeatureSchema::standard(),
            sentiment: Arc::new(LexiconSentimentAnalyzer::new()),
            tagger: Arc::new(HeuristicPosTagger::new()),
            lemmatizer: Arc::new(RuleLemmatizer::new()),
        }
    }

    pub fn with_sentiment(mut self, sentiment: Arc<dyn SentimentAnalyzer>) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    /// Replace the lexicon. The schema is rebuilt to match its categories.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.schema = Arc::new(FeatureSchema::new(&lexicon));
        self.lexicon = Arc::new(lexicon);
        self
    }

    /// Schema every vector from this extractor is projected with.
    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extract the metric vector of one character.
    ///
    /// Never fails: an empty corpus yields a zero vector with a warning and
    /// backend failures fall back to neutral values.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub fn extract<S: AsRef<str>>(&self, character: &str, lines: &[S]) -> MetricVector {
        let full_text = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");

        let mut metrics = DialogueMetrics::zeroed(&self.schema);

        if full_text.trim().is_empty() {
            metrics.warning = Some(NO_DIALOGUE_WARNING.to_string());
            metrics.raw_dialogue = full_text;
            debug!(character, "No dialogue, emitting zero vector");
            return MetricVector::new(character, metrics, &self.schema);
        }

        let sentences = split_sentences(&full_text);
        let words = word_tokens(&full_text, MIN_TOKEN_LEN);

        metrics.sentence_count = sentences.len();
        metrics.word_count = words.len();

        let floor = self.config.min_words_for_reliable;
        if words.len() < floor {
            metrics.warning = Some(format!(
                "Small sample ({} words). Results may be unreliable. Recommend >= {} words.",
                words.len(),
                floor
            ));
        }

        if !words.is_empty() {
            metrics.lexical = lexical_metrics(&words);
            metrics.syntactic = syntactic_metrics(&sentences);
            metrics.sentiment = self.sentiment_metrics(character, &sentences);

            let tags = self.tag(character, &words);
            metrics.pos = pos_distribution(&tags);
            metrics.lexicon = self.lexicon.score(&words);
            metrics.top_keywords = self.top_keywords(character, &words, &tags);
        }

        metrics.raw_dialogue = full_text;

        debug!(
            character,
            words = metrics.word_count,
            sentences = metrics.sentence_count,
            "Extracted dialogue metrics"
        );
        MetricVector::new(character, metrics, &self.schema)
    }

    fn sentiment_metrics(&self, character: &str, sentences: &[String]) -> SentimentScores {
        let mut sum = SentimentScores::default();
        let mut failures = 0usize;

        for sentence in sentences {
            match self.sentiment.polarity_scores(sentence) {
                Ok(s) => {
                    sum.positive += s.positive;
                    sum.negative += s.negative;
                    sum.neutral += s.neutral;
                    sum.compound += s.compound;
                }
                Err(e) => {
                    failures += 1;
                    if failures == 1 {
                        warn!(character, error = %e, "Sentiment scoring failed, scoring sentence as zero");
                    }
                }
            }
        }

        if failures > 1 {
            warn!(character, failures, "Sentiment backend failed on multiple sentences");
        }

        let n = sentences.len().max(1) as f64;
        SentimentScores {
            positive: sum.positive / n,
            negative: sum.negative / n,
            neutral: sum.neutral / n,
            compound: sum.compound / n,
        }
    }

    fn tag(&self, character: &str, words: &[String]) -> Vec<PosTag> {
        match self.tagger.tag(words) {
            Ok(tags) if tags.len() == words.len() => tags,
            Ok(tags) => {
                warn!(
                    character,
                    expected = words.len(),
                    actual = tags.len(),
                    "Tagger returned wrong number of tags, tagging all tokens as nouns"
                );
                vec![PosTag::Noun; words.len()]
            }
            Err(e) => {
                warn!(character, error = %e, "Tagging failed, tagging all tokens as nouns");
                vec![PosTag::Noun; words.len()]
            }
        }
    }

    fn top_keywords(&self, character: &str, words: &[String], tags: &[PosTag]) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut failures = 0usize;

        for (word, tag) in words.iter().zip(tags) {
            if !tag.is_content() || is_stop_word(word) || word.chars().count() < MIN_KEYWORD_LEN {
                continue;
            }
            let lemma = match self.lemmatizer.lemmatize(word, *tag) {
                Ok(lemma) => lemma,
                Err(e) => {
                    failures += 1;
                    if failures == 1 {
                        warn!(character, error = %e, "Lemmatization failed, keeping surface form");
                    }
                    word.clone()
                }
            };
            match index.get(&lemma) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(lemma.clone(), counts.len());
                    counts.push((lemma, 1));
                }
            }
        }

        // stable: equal counts keep first-occurrence order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.config.top_keywords);
        counts
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

fn lexical_metrics(words: &[String]) -> LexicalMetrics {
    let total = words.len() as f64;
    let avg_word_length = words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / total;

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for w in words {
        *freq.entry(w.as_str()).or_insert(0) += 1;
    }
    let unique = freq.len();
    let hapax = freq.values().filter(|&&c| c == 1).count();

    LexicalMetrics {
        avg_word_length,
        type_token_ratio: unique as f64 / total,
        hapax_ratio: if unique == 0 {
            0.0
        } else {
            hapax as f64 / unique as f64
        },
    }
}

fn syntactic_metrics(sentences: &[String]) -> SyntacticMetrics {
    if sentences.is_empty() {
        return SyntacticMetrics::default();
    }

    let mut total_words = 0usize;
    let mut questions = 0usize;
    let mut exclamations = 0usize;
    let mut fragments = 0usize;

    for sentence in sentences {
        let count = alphabetic_word_count(sentence);
        total_words += count;
        let trimmed = sentence.trim();
        if trimmed.ends_with('?') {
            questions += 1;
        }
        if trimmed.ends_with('!') {
            exclamations += 1;
        }
        if count < FRAGMENT_WORDS {
            fragments += 1;
        }
    }

    let n = sentences.len() as f64;
    SyntacticMetrics {
        avg_sentence_length: total_words as f64 / n,
        question_ratio: questions as f64 / n,
        exclamation_ratio: exclamations as f64 / n,
        fragment_ratio: fragments as f64 / n,
    }
}

/// Shares of noun/verb/adjective/adverb among tokens in those four classes.
fn pos_distribution(tags: &[PosTag]) -> PosDistribution {
    let mut counts = [0usize; 4];
    for tag in tags {
        match tag {
            PosTag::Noun => counts[0] += 1,
            PosTag::Verb => counts[1] += 1,
            PosTag::Adjective => counts[2] += 1,
            PosTag::Adverb => counts[3] += 1,
            PosTag::Other => {}
        }
    }
    let total = counts.iter().sum::<usize>().max(1) as f64;
    PosDistribution {
        noun_pct: counts[0] as f64 / total,
        verb_pct: counts[1] as f64 / total,
        adj_pct: counts[2] as f64 / total,
        adv_pct: counts[3] as f64 / total,
    }
}
