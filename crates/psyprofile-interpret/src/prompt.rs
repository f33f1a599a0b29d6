//! Prompt text for the narrative interpretation.

use crate::request::InterpretationRequest;

/// System instruction sent with every interpretation request.
pub const SYSTEM_PROMPT: &str = "\
YOU ARE A NARRATIVE PSYCHOLOGIST AND LITERARY PROFILER.

You are given:
1. A PROFILE REGISTRY showing predefined psychological archetypes and which screenplay
   characters matched each archetype, with quantitative similarity scores.
2. QUANTITATIVE METRICS per character (lexical, syntactic, sentiment, LIWC categories).
3. RAW DIALOGUE excerpts per character.

YOUR TASK:
- For each character, write a 3-5 sentence psychological interpretation that EXPLAINS
  why they matched their assigned profiles.
- CITE SPECIFIC EVIDENCE: reference exact metrics (e.g. \"anger LIWC score of 0.12\")
  and quote specific dialogue lines.
- EXPLAIN MULTI-MEMBERSHIP: if a character matches multiple profiles, explain what
  traits bridge those profiles.
- IDENTIFY DISCREPANCIES: if quantitative data contradicts the dialogue tone, note it.
- End with a brief ENSEMBLE ANALYSIS: how do these characters' profiles interact
  dramatically? What tensions or alliances do the profiles predict?

OUTPUT FORMAT: Clean Markdown with ## headers per character.
";

/// User turn: registry, metrics and dialogue sections.
pub fn render_user_payload(request: &InterpretationRequest) -> String {
    format!(
        "=== PROFILE REGISTRY ===\n{}\n\n\
         === QUANTITATIVE METRICS ===\n{}\n\n\
         === RAW DIALOGUE EXCERPTS ===\n{}\n",
        request.registry_summary,
        request.metrics_summary,
        request.excerpts_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_sections_in_order() {
        let request = InterpretationRequest {
            registry_summary: "### The Rebel\nMembers: ZED (0.612)\nPartial: none".into(),
            metrics_summary: "### ZED\nWords: 40".into(),
            excerpts: vec![("ZED".into(), "No rules.".into()), ("AMY".into(), "Hi.".into())],
        };
        let payload = render_user_payload(&request);

        let registry = payload.find("=== PROFILE REGISTRY ===").expect("registry");
        let metrics = payload.find("=== QUANTITATIVE METRICS ===").expect("metrics");
        let dialogue = payload.find("=== RAW DIALOGUE EXCERPTS ===").expect("dialogue");
        assert!(registry < metrics && metrics < dialogue);
        assert!(payload.contains("### ZED\nNo rules.\n\n### AMY\nHi."));
        println!("[PASS] test_payload_sections_in_order\n{}", payload);
    }

    #[test]
    fn test_system_prompt_headline() {
        assert!(SYSTEM_PROMPT.starts_with("YOU ARE A NARRATIVE PSYCHOLOGIST"));
        assert!(SYSTEM_PROMPT.contains("ENSEMBLE ANALYSIS"));
    }
}
