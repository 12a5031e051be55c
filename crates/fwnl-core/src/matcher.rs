//! Picks the intent template a free-text request most likely asks for.

use crate::distance::damerau;
use crate::engine::LanguageEngine;
use crate::intent::IntentKind;

/// Best-scoring template and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub intent: IntentKind,
    pub score: f64,
}

/// Register every template's entity rule with `engine`.
pub fn install_entities(engine: &dyn LanguageEngine, templates: &[IntentKind]) {
    for kind in templates {
        engine.register_entity(kind.entity_rule());
    }
}

/// Score every template against `text` and return the best one.
///
/// `None` only when `templates` is empty. Ties keep the earlier template.
pub fn closest(text: &str, templates: &[IntentKind], engine: &dyn LanguageEngine) -> Option<Match> {
    let tokens = engine.normalize(text);
    let spans = engine.entity_spans(text);

    let mut best: Option<Match> = None;
    for &intent in templates {
        let similarity = engine.similarity(text, intent.description());
        let keywords = keyword_hits(&tokens, intent.keywords());
        let entity = if spans.iter().any(|s| s.label == intent.label()) {
            1.0
        } else {
            0.0
        };
        let score = similarity + keywords as f64 + entity;
        tracing::debug!(
            intent = intent.label(),
            similarity,
            keywords,
            entity,
            score,
            "intent scored"
        );
        if best.is_none_or(|b| score > b.score) {
            best = Some(Match { intent, score });
        }
    }
    best
}

/// Count tokens that fuzzily hit a keyword. Each keyword counts once.
pub fn keyword_hits(tokens: &[String], mut keywords: Vec<String>) -> usize {
    let mut hits = 0;
    for token in tokens {
        if let Some(pos) = keywords.iter().position(|k| damerau(k, token) <= 1) {
            keywords.remove(pos);
            hits += 1;
        }
    }
    hits
}
