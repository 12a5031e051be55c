//! Word lists backing the rule engine: stop words, lemmas, concepts.

/// English function words dropped by normalization.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "being", "both", "but", "by", "can", "could", "did", "do", "does", "doing",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "let", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "out", "over", "own", "please", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "us",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours",
];

/// Irregular or ambiguous inflections, resolved before suffix rules run.
pub(crate) const IRREGULAR: &[(&str, &str)] = &[
    ("shaping", "shape"),
    ("shaped", "shape"),
    ("shapes", "shape"),
    ("capping", "cap"),
    ("capped", "cap"),
    ("caps", "cap"),
    ("blocking", "block"),
    ("blocked", "block"),
    ("limiting", "limit"),
    ("limited", "limit"),
    ("reducing", "reduce"),
    ("reduced", "reduce"),
    ("managing", "manage"),
    ("managed", "manage"),
    ("filtering", "filter"),
    ("filtered", "filter"),
    ("throttling", "throttle"),
    ("throttled", "throttle"),
    ("denied", "deny"),
    ("denies", "deny"),
    ("accesses", "access"),
    ("addresses", "address"),
    ("wanted", "want"),
    ("wanna", "want"),
    ("traffic", "traffic"),
    ("speed", "speed"),
    ("string", "string"),
    ("bps", "bps"),
    ("qos", "qos"),
    ("status", "status"),
    ("does", "do"),
    ("has", "have"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
];

/// Lemmas that end in a silent `e`, used to repair stripped suffixes
/// (`prioritizing` → `prioritiz` → `prioritize`).
pub(crate) const E_ENDINGS: &[&str] = &[
    "shape", "reduce", "manage", "throttle", "prioritize", "configure", "create", "define",
    "restrict", "route", "rate", "secure", "make", "use", "isolate", "enable", "disable",
];

/// Concept groups shared by the similarity vectors. A lemma listed here
/// contributes to its group's dimension instead of its own.
pub(crate) const CONCEPTS: &[(&str, &[&str])] = &[
    (
        "access_control",
        &[
            "access", "control", "list", "acl", "block", "deny", "filter", "allow", "permit",
            "forbid", "reject", "drop", "restrict", "firewall", "manage", "prevent", "ban",
            "stop", "rule",
        ],
    ),
    (
        "shaping",
        &[
            "shape", "limit", "throttle", "cap", "reduce", "bandwidth", "rate", "throughput",
            "speed", "slow", "qos", "prioritize", "bps", "quota",
        ],
    ),
];

pub(crate) fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

pub(crate) fn concept_of(lemma: &str) -> Option<&'static str> {
    CONCEPTS
        .iter()
        .find(|(_, words)| words.contains(&lemma))
        .map(|(name, _)| *name)
}

/// Reduce a lower-cased word to its lemma.
pub(crate) fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR.iter().find(|(w, _)| *w == word) {
        return (*lemma).to_string();
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return word.to_string();
    }

    if let Some(s) = word.strip_suffix("ies").filter(|s| s.len() >= 2) {
        format!("{s}y")
    } else if let Some(s) = word.strip_suffix("ing").filter(|s| s.len() >= 3) {
        restore(s)
    } else if let Some(s) = word.strip_suffix("ed").filter(|s| s.len() >= 3) {
        restore(s)
    } else if let Some(s) = word
        .strip_suffix('s')
        .filter(|s| s.len() >= 3 && !s.ends_with('s') && !s.ends_with('u'))
    {
        s.to_string()
    } else {
        word.to_string()
    }
}

/// Undo doubled final consonants and restore a silent `e`.
fn restore(stem: &str) -> String {
    let with_e = format!("{stem}e");
    if E_ENDINGS.contains(&with_e.as_str()) {
        return with_e;
    }
    let bytes = stem.as_bytes();
    if bytes.len() >= 2 {
        let last = bytes[bytes.len() - 1];
        if last == bytes[bytes.len() - 2] && !b"aeiouls".contains(&last) {
            return stem[..stem.len() - 1].to_string();
        }
    }
    stem.to_string()
}
