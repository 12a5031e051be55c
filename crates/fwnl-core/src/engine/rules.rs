//! Rule-based language engine: lexicon lemmas, concept-vector similarity,
//! token patterns and entity rules.
//!
//! Deterministic and dependency-light: no model files, no network. Good
//! enough for the small closed vocabulary of network-policy dialogues.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use regex::Regex;

use super::lexicon;
use super::{EntityRule, EntitySpan, LanguageEngine, PatternMatch, PatternSpec, tokenize};

/// A registered pattern, compiled once at registration.
#[derive(Debug)]
enum Compiled {
    Regex(Regex),
    Words(Vec<String>),
}

impl Compiled {
    fn matches(&self, token: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(token),
            Self::Words(words) => words.iter().any(|w| w.eq_ignore_ascii_case(token)),
        }
    }
}

/// Lexicon-and-rules implementation of [`LanguageEngine`].
#[derive(Debug, Default)]
pub struct RuleEngine {
    patterns: RwLock<Vec<(String, Compiled)>>,
    entities: RwLock<Vec<EntityRule>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered token patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn vector(&self, text: &str) -> HashMap<String, f64> {
        let mut v = HashMap::new();
        for lemma in self.normalize(text) {
            let dim = lexicon::concept_of(&lemma)
                .map(str::to_string)
                .unwrap_or(lemma);
            *v.entry(dim).or_insert(0.0) += 1.0;
        }
        v
    }
}

impl LanguageEngine for RuleEngine {
    fn normalize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        tokenize(&lower)
            .into_iter()
            .filter(|t| t.chars().any(char::is_alphanumeric))
            .filter(|t| !lexicon::is_stop_word(t))
            .map(lexicon::lemmatize)
            .collect()
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        let va = self.vector(a);
        let vb = self.vector(b);
        if va.is_empty() || vb.is_empty() {
            return 0.0;
        }
        let dot: f64 = va
            .iter()
            .filter_map(|(k, x)| vb.get(k).map(|y| x * y))
            .sum();
        let norm = |v: &HashMap<String, f64>| v.values().map(|x| x * x).sum::<f64>().sqrt();
        (dot / (norm(&va) * norm(&vb))).clamp(0.0, 1.0)
    }

    fn register_pattern(&self, label: &str, spec: PatternSpec) {
        let mut patterns = self
            .patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if patterns.iter().any(|(l, _)| l == label) {
            return;
        }
        let compiled = match spec {
            PatternSpec::Regex(src) => match Regex::new(&src) {
                Ok(re) => Compiled::Regex(re),
                Err(e) => {
                    tracing::error!(label, error = %e, "pattern rejected");
                    return;
                }
            },
            PatternSpec::Word(w) => Compiled::Words(vec![w]),
            PatternSpec::AnyOf(words) => Compiled::Words(words),
        };
        tracing::debug!(label, "pattern registered");
        patterns.push((label.to_string(), compiled));
    }

    fn match_patterns(&self, text: &str) -> Vec<PatternMatch> {
        let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        let mut out = Vec::new();
        for token in tokenize(text) {
            for (label, pattern) in patterns.iter() {
                if pattern.matches(token) {
                    out.push(PatternMatch {
                        label: label.clone(),
                        span: token.to_string(),
                    });
                }
            }
        }
        out
    }

    fn register_entity(&self, rule: EntityRule) {
        let mut entities = self
            .entities
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entities.iter().any(|r| r.label == rule.label) {
            return;
        }
        entities.push(rule);
    }

    fn entity_spans(&self, text: &str) -> Vec<EntitySpan> {
        let lemmas = self.normalize(text);
        let entities = self.entities.read().unwrap_or_else(PoisonError::into_inner);
        let mut spans = Vec::new();
        let mut i = 0;
        while i < lemmas.len() {
            let hit = entities
                .iter()
                .find_map(|rule| rule.match_at(&lemmas, i).map(|len| (rule, len)));
            match hit {
                Some((rule, len)) => {
                    spans.push(EntitySpan {
                        label: rule.label.clone(),
                        span: lemmas[i..i + len].join(" "),
                    });
                    i += len;
                }
                None => i += 1,
            }
        }
        spans
    }

    fn name(&self) -> &str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RuleEngine {
        let e = RuleEngine::new();
        e.register_entity(
            EntityRule::new("ACL")
                .optional_word("want")
                .word("access")
                .in_list(&["filter", "block", "manage"]),
        );
        e.register_entity(
            EntityRule::new("TS")
                .optional_word("want")
                .word("traffic")
                .in_list(&["shape", "limit", "reduce", "cap"]),
        );
        e
    }

    #[test]
    fn normalize_drops_stop_words_and_punctuation() {
        let e = RuleEngine::new();
        assert_eq!(
            e.normalize("I want to block FTP traffic from the lab!"),
            vec!["want", "block", "ftp", "traffic", "lab"]
        );
    }

    #[test]
    fn normalize_lemmatizes() {
        let e = RuleEngine::new();
        assert_eq!(e.normalize("Traffic Shaping"), vec!["traffic", "shape"]);
        assert_eq!(e.normalize("blocking servers"), vec!["block", "server"]);
    }

    #[test]
    fn similarity_bounds() {
        let e = RuleEngine::new();
        assert_eq!(e.similarity("", "Access Control List"), 0.0);
        assert!((e.similarity("traffic shaping", "Traffic Shaping") - 1.0).abs() < 1e-9);
        let s = e.similarity("deny the lab", "Access Control List");
        assert!(s > 0.0 && s < 1.0);
    }

    #[test]
    fn similarity_uses_shared_concepts() {
        let e = RuleEngine::new();
        let acl = e.similarity("block ftp", "Access Control List");
        let ts = e.similarity("block ftp", "Traffic Shaping");
        assert!(acl > ts);
        let acl = e.similarity("throttle the classroom", "Access Control List");
        let ts = e.similarity("throttle the classroom", "Traffic Shaping");
        assert!(ts > acl);
    }

    #[test]
    fn register_pattern_is_idempotent_per_label() {
        let e = RuleEngine::new();
        e.register_pattern("BEFORE", PatternSpec::word("before"));
        e.register_pattern("BEFORE", PatternSpec::word("ahead"));
        assert_eq!(e.pattern_count(), 1);
        assert!(e.match_patterns("ahead").is_empty());
        assert_eq!(e.match_patterns("before")[0].label, "BEFORE");
    }

    #[test]
    fn concurrent_pattern_install_registers_each_label_once() {
        let e = RuleEngine::new();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| crate::values::install_patterns(&e));
            }
        });
        assert_eq!(e.pattern_count(), 12);
        let hits = e.match_patterns("ftp");
        assert_eq!(hits.iter().filter(|m| m.label == "PROTOCOL").count(), 1);
    }

    #[test]
    fn invalid_regex_is_not_registered() {
        let e = RuleEngine::new();
        e.register_pattern("BROKEN", PatternSpec::regex("(unclosed"));
        assert_eq!(e.pattern_count(), 0);
    }

    #[test]
    fn match_patterns_reports_every_hit_in_token_order() {
        let e = RuleEngine::new();
        e.register_pattern("PROTOCOL", PatternSpec::any_of(&["ftp", "ssh"]));
        e.register_pattern("RAW", PatternSpec::regex(r"[\w\-]+"));
        let hits = e.match_patterns("SSH then ftp");
        let labels: Vec<(&str, &str)> = hits
            .iter()
            .map(|m| (m.label.as_str(), m.span.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("PROTOCOL", "SSH"),
                ("RAW", "SSH"),
                ("RAW", "then"),
                ("PROTOCOL", "ftp"),
                ("RAW", "ftp"),
            ]
        );
    }

    #[test]
    fn entity_spans_recognize_intent_phrases() {
        let e = engine();
        let spans = e.entity_spans("I want to access the lab and block it");
        assert!(spans.is_empty());

        let spans = e.entity_spans("I want access block for the lab");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "ACL");
        assert_eq!(spans[0].span, "want access block");

        let spans = e.entity_spans("please, traffic limit for the classroom");
        assert_eq!(spans[0].label, "TS");
    }

    #[test]
    fn entity_spans_empty_without_rules() {
        let e = RuleEngine::new();
        assert!(e.entity_spans("want access block").is_empty());
    }
}
