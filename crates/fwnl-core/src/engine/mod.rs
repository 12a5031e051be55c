//! Language engine boundary.
//!
//! The dialogue core never tokenizes, lemmatizes or scores text itself; it
//! asks a [`LanguageEngine`]. The workspace ships [`RuleEngine`], a small
//! deterministic lexicon-and-rules engine, and tests can plug in their own.

mod lexicon;
pub mod rules;

pub use rules::RuleEngine;

/// Natural-language capabilities consumed by the dialogue core.
pub trait LanguageEngine: Send + Sync {
    /// Lower-cased lemmas with stop words and punctuation removed, in order.
    fn normalize(&self, text: &str) -> Vec<String>;

    /// Semantic similarity between two texts, in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Register a token pattern under `label`. Registering a label that is
    /// already known is a no-op.
    fn register_pattern(&self, label: &str, spec: PatternSpec);

    /// Every `(label, token)` hit of the registered patterns in `text`.
    fn match_patterns(&self, text: &str) -> Vec<PatternMatch>;

    /// Register an entity rule. Rules are keyed by label like patterns.
    fn register_entity(&self, rule: EntityRule);

    /// Entity spans recognized in `text`.
    fn entity_spans(&self, text: &str) -> Vec<EntitySpan>;

    /// Engine name (for logging).
    fn name(&self) -> &str;
}

/// How a single token is recognized by a registered pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSpec {
    /// Regular expression searched in the token text. Anchor it with `^…$`
    /// for whole-token matches.
    Regex(String),
    /// Case-insensitive exact word.
    Word(String),
    /// Case-insensitive membership in a word list.
    AnyOf(Vec<String>),
}

impl PatternSpec {
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    pub fn word(word: impl Into<String>) -> Self {
        Self::Word(word.into())
    }

    pub fn any_of(words: &[&str]) -> Self {
        Self::AnyOf(words.iter().map(|w| (*w).to_string()).collect())
    }
}

/// A token recognized by a registered pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub label: String,
    pub span: String,
}

/// A labelled span recognized by an entity rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: String,
    pub span: String,
}

/// One position of an entity rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMatch {
    Word(String),
    InList(Vec<String>),
}

impl TokenMatch {
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Word(w) => w.eq_ignore_ascii_case(token),
            Self::InList(list) => list.iter().any(|w| w.eq_ignore_ascii_case(token)),
        }
    }
}

/// A token of an entity rule, possibly optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub token: TokenMatch,
    pub optional: bool,
}

/// A sequence of token rules that marks the matched lemmas with `label`.
///
/// `want? access {filter, block, manage}` is written as
/// `EntityRule::new("ACL").optional_word("want").word("access").in_list(&[..])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRule {
    pub label: String,
    pub tokens: Vec<TokenRule>,
}

impl EntityRule {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tokens: Vec::new(),
        }
    }

    pub fn word(mut self, word: &str) -> Self {
        self.tokens.push(TokenRule {
            token: TokenMatch::Word(word.to_string()),
            optional: false,
        });
        self
    }

    pub fn optional_word(mut self, word: &str) -> Self {
        self.tokens.push(TokenRule {
            token: TokenMatch::Word(word.to_string()),
            optional: true,
        });
        self
    }

    pub fn in_list(mut self, words: &[&str]) -> Self {
        self.tokens.push(TokenRule {
            token: TokenMatch::InList(words.iter().map(|w| (*w).to_string()).collect()),
            optional: false,
        });
        self
    }

    /// Every literal word of the rule, in rule order.
    pub fn keywords(&self) -> Vec<String> {
        let mut out = Vec::new();
        for rule in &self.tokens {
            match &rule.token {
                TokenMatch::Word(w) => out.push(w.clone()),
                TokenMatch::InList(list) => out.extend(list.iter().cloned()),
            }
        }
        out
    }

    /// Length of the match starting at `tokens[start]`, if any.
    ///
    /// Optional items are tried greedily first and dropped on failure.
    pub fn match_at(&self, tokens: &[String], start: usize) -> Option<usize> {
        fn walk(rules: &[TokenRule], tokens: &[String], pos: usize) -> Option<usize> {
            let Some((first, rest)) = rules.split_first() else {
                return Some(pos);
            };
            if let Some(token) = tokens.get(pos)
                && first.token.matches(token)
                && let Some(end) = walk(rest, tokens, pos + 1)
            {
                return Some(end);
            }
            if first.optional {
                return walk(rest, tokens, pos);
            }
            None
        }

        let end = walk(&self.tokens, tokens, start)?;
        (end > start).then_some(end - start)
    }
}

/// Split text into tokens, trimming surrounding punctuation.
///
/// Interior `.`, `:`, `/` and `-` survive so that addresses, prefixes and
/// rates stay single tokens (`10.0.0.0/24`, `fe80::1`, `10mbps`).
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| TRIMMED.contains(&c)))
        .map(|t| t.trim_end_matches('.'))
        .filter(|t| !t.is_empty())
        .collect()
}

const TRIMMED: &[char] = &[
    ',', ';', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', '`',
];
