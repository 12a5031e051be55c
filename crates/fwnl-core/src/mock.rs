//! Scripted language engine for tests.
//!
//! Similarity and entity spans are fixed up front so scoring can be pinned
//! down exactly. Patterns are delegated to a real [`RuleEngine`] so value
//! verification still works.

use std::collections::HashMap;

use crate::engine::{EntityRule, EntitySpan, LanguageEngine, PatternMatch, PatternSpec, RuleEngine};

#[derive(Debug, Default)]
pub struct ScriptedEngine {
    similarity: HashMap<String, f64>,
    entities: Vec<EntitySpan>,
    patterns: RuleEngine,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Similarity returned for any text compared against `description`.
    pub fn with_similarity(mut self, description: &str, score: f64) -> Self {
        self.similarity.insert(description.to_string(), score);
        self
    }

    /// Entity span reported for every text.
    pub fn with_entity(mut self, label: &str, span: &str) -> Self {
        self.entities.push(EntitySpan {
            label: label.to_string(),
            span: span.to_string(),
        });
        self
    }
}

impl LanguageEngine for ScriptedEngine {
    fn normalize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_lowercase).collect()
    }

    fn similarity(&self, _a: &str, b: &str) -> f64 {
        self.similarity.get(b).copied().unwrap_or(0.0)
    }

    fn register_pattern(&self, label: &str, spec: PatternSpec) {
        self.patterns.register_pattern(label, spec);
    }

    fn match_patterns(&self, text: &str) -> Vec<PatternMatch> {
        self.patterns.match_patterns(text)
    }

    fn register_entity(&self, _rule: EntityRule) {}

    fn entity_spans(&self, _text: &str) -> Vec<EntitySpan> {
        self.entities.clone()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
