//! Question matching over the knowledge base
//!
//! Exact lookup first; otherwise every stored question is scored by
//! containment, the share of its own tokens that also occur in the incoming
//! question.

use std::collections::HashSet;

use crate::store::KnowledgeBase;

/// Score a fuzzy candidate must strictly exceed to be suggested
pub const FUZZY_THRESHOLD: f32 = 0.5;

/// Best fuzzy candidate for a question
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// The stored question that scored highest
    pub key: String,
    /// Containment score in [0, 1]
    pub score: f32,
}

/// Lower-cased whitespace token set of a question; duplicates collapse
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Verbatim, case-sensitive key lookup
pub fn exact_match<'a>(base: &'a KnowledgeBase, question: &str) -> Option<&'a str> {
    base.get(question).map(String::as_str)
}

/// Find the stored question with the highest containment score against the
/// incoming one. The denominator is the candidate's own token count, so a
/// short stored question fully contained in a long query scores 1.0.
///
/// Returns `None` when the base is empty, every key is whitespace-only, or no
/// key shares a single token with the question. The first key to reach a
/// given score keeps it; among equal scores the winner follows the base's
/// unspecified iteration order.
pub fn best_fuzzy_match(base: &KnowledgeBase, question: &str) -> Option<FuzzyMatch> {
    let question_tokens = tokenize(question);
    let mut best: Option<FuzzyMatch> = None;

    for key in base.keys() {
        let key_tokens = tokenize(key);
        // A zero-token key cannot be scored and must never win.
        if key_tokens.is_empty() {
            continue;
        }

        let overlap = key_tokens.intersection(&question_tokens).count();
        let score = overlap as f32 / key_tokens.len() as f32;

        let best_score = best.as_ref().map_or(0.0, |b| b.score);
        if score > best_score {
            best = Some(FuzzyMatch {
                key: key.clone(),
                score,
            });
        }
    }

    if let Some(m) = &best {
        tracing::debug!("best fuzzy match for '{}': '{}' ({:.2})", question, m.key, m.score);
    }
    best
}
