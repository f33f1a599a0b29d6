//! What gets sent to the interpretation service.

use serde::{Deserialize, Serialize};

use psyprofile_core::features::MetricVector;
use psyprofile_core::ProfileRun;

/// Rendered run data for one interpretation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationRequest {
    /// `### {profile}` / `Members:` / `Partial:` blocks
    pub registry_summary: String,
    /// One block of headline metrics per character
    pub metrics_summary: String,
    /// `(character, truncated raw dialogue)` in character order
    pub excerpts: Vec<(String, String)>,
}

impl InterpretationRequest {
    /// Render a run, keeping at most `max_excerpt_chars` characters of each
    /// character's dialogue.
    pub fn from_run(run: &ProfileRun, max_excerpt_chars: usize) -> Self {
        let metrics_summary = run
            .vectors
            .iter()
            .map(|(name, vector)| metrics_line(name, vector))
            .collect::<Vec<_>>()
            .join("\n");

        let excerpts = run
            .vectors
            .iter()
            .map(|(name, vector)| {
                (
                    name.clone(),
                    truncate_chars(&vector.metrics().raw_dialogue, max_excerpt_chars),
                )
            })
            .collect();

        Self {
            registry_summary: run.registry.render_summary(),
            metrics_summary,
            excerpts,
        }
    }

    /// Excerpts as `### {name}` blocks separated by blank lines.
    pub fn excerpts_text(&self) -> String {
        self.excerpts
            .iter()
            .map(|(name, text)| format!("### {}\n{}", name, text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn metrics_line(name: &str, vector: &MetricVector) -> String {
    let m = vector.metrics();
    let lexicon = |category: &str| m.lexicon.get(category).copied().unwrap_or(0.0);
    format!(
        "### {}\nWords: {}, Sentiment compound: {:+.3}, TTR: {:.3}, Fragments: {:.2}%, \
         LIWC anger: {:.3}, LIWC cognitive: {:.3}, LIWC power: {:.3}, LIWC risk: {:.3}",
        name,
        m.word_count,
        m.sentiment.compound,
        m.lexical.type_token_ratio,
        m.syntactic.fragment_ratio * 100.0,
        lexicon("anger"),
        lexicon("cognitive"),
        lexicon("power"),
        lexicon("risk_danger"),
    )
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
