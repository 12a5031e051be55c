//! Answerable leaf values: the alternatives a slot can take.
//!
//! Each [`ValueKind`] carries a fixed capability table (wire name, hint,
//! pattern labels, pattern specs). A [`Value`] is the kind plus its payload.

use crate::engine::{LanguageEngine, PatternSpec};

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

/// Best-effort IPv6 literal. Approximate: it accepts the common compressed
/// forms and IPv4-mapped tails but is not a full RFC 4291 grammar.
const IPV6: &str = concat!(
    r"^(?:",
    r"(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}",
    r"|(?:[0-9a-fA-F]{1,4}:){1,7}:",
    r"|(?:[0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}",
    r"|(?:[0-9a-fA-F]{1,4}:){1,5}(?::[0-9a-fA-F]{1,4}){1,2}",
    r"|(?:[0-9a-fA-F]{1,4}:){1,4}(?::[0-9a-fA-F]{1,4}){1,3}",
    r"|(?:[0-9a-fA-F]{1,4}:){1,3}(?::[0-9a-fA-F]{1,4}){1,4}",
    r"|(?:[0-9a-fA-F]{1,4}:){1,2}(?::[0-9a-fA-F]{1,4}){1,5}",
    r"|[0-9a-fA-F]{1,4}:(?::[0-9a-fA-F]{1,4}){1,6}",
    r"|:(?:(?::[0-9a-fA-F]{1,4}){1,7}|:)",
    r"|fe80:(?::[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]+",
    r"|::(?:ffff(?::0{1,4})?:)?(?:(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])\.){3}(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])",
    r"|(?:[0-9a-fA-F]{1,4}:){1,4}:(?:(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])\.){3}(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])",
    r")$",
);

pub const HOSTNAMES: &[&str] = &[
    "all",
    "laboratory",
    "server",
    "professor",
    "secretary",
    "classroom",
];

pub const PROTOCOLS: &[&str] = &["http", "https", "ftp", "ssh", "telnet", "smtp"];

const AFFIRMATIVE: &[&str] = &["yes", "confirm", "ok", "sure", "yep", "y"];
const NEGATIVE: &[&str] = &["no", "cancel", "nope", "n"];

/// Variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Endpoint,
    Range,
    Protocol,
    Confirm,
    Raw,
    Throughput,
    Before,
    After,
}

impl ValueKind {
    pub const ALL: [ValueKind; 8] = [
        Self::Endpoint,
        Self::Range,
        Self::Protocol,
        Self::Confirm,
        Self::Raw,
        Self::Throughput,
        Self::Before,
        Self::After,
    ];

    /// Wire name. Raw values are called `Text`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Endpoint => "Endpoint",
            Self::Range => "Range",
            Self::Protocol => "Protocol",
            Self::Confirm => "Confirm",
            Self::Raw => "Text",
            Self::Throughput => "Throughput",
            Self::Before => "Before",
            Self::After => "After",
        }
    }

    /// Look up a kind by wire name. `Confirm` is not addressable by name;
    /// it travels under the `special` discriminator.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .filter(|k| *k != Self::Confirm)
            .find(|k| k.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Endpoint | Self::Range => "Value of address property.",
            Self::Protocol => "Value of Protocol property.",
            Self::Confirm => "Value of Confirm property.",
            Self::Raw => "Value of Text property.",
            Self::Throughput => "Value of Throughput property.",
            Self::Before => "Value of Before property.",
            Self::After => "Value of After property.",
        }
    }

    /// Human-readable list of accepted forms.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::Endpoint => Some("IPv4|IPV6|laboratory|server|professor|secretary|classroom"),
            Self::Range => Some("IP range (v4 or v6)"),
            Self::Protocol => Some("http|https|ftp|ssh|telnet|smtp"),
            Self::Throughput => Some("bits per second"),
            Self::Confirm | Self::Raw | Self::Before | Self::After => None,
        }
    }

    /// Pattern labels this kind accepts.
    pub fn pattern_labels(self) -> &'static [&'static str] {
        match self {
            Self::Endpoint => &["IPV4", "IPV6", "HOSTNAME"],
            Self::Range => &["IPV4_RANGE"],
            Self::Protocol => &["PROTOCOL"],
            Self::Confirm => &["CONFIRM", "CANCEL"],
            Self::Raw => &["RAW"],
            Self::Throughput => &["THROUGHPUT"],
            Self::Before => &["BEFORE"],
            Self::After => &["AFTER"],
        }
    }

    /// Token patterns registered with the language engine for this kind.
    pub fn patterns(self) -> Vec<(&'static str, PatternSpec)> {
        match self {
            Self::Endpoint => vec![
                (
                    "IPV4",
                    PatternSpec::regex(format!(r"^{OCTET}(?:\.{OCTET}){{3}}$")),
                ),
                ("IPV6", PatternSpec::regex(IPV6)),
                (
                    "HOSTNAME",
                    PatternSpec::regex(format!(r"(?i)^(?:{})$", HOSTNAMES.join("|"))),
                ),
            ],
            Self::Range => vec![(
                "IPV4_RANGE",
                PatternSpec::regex(format!(
                    r"^{OCTET}(?:\.{OCTET}){{3}}/(?:[1-9]|[12][0-9]|3[01])$"
                )),
            )],
            Self::Protocol => vec![("PROTOCOL", PatternSpec::any_of(PROTOCOLS))],
            Self::Confirm => vec![
                ("CONFIRM", PatternSpec::any_of(AFFIRMATIVE)),
                ("CANCEL", PatternSpec::any_of(NEGATIVE)),
            ],
            Self::Raw => vec![("RAW", PatternSpec::regex(r"[\w\-]+"))],
            Self::Throughput => vec![(
                "THROUGHPUT",
                PatternSpec::regex(r"(?i)^[0-9]+[tgmk]?bps$"),
            )],
            Self::Before => vec![("BEFORE", PatternSpec::word("before"))],
            Self::After => vec![("AFTER", PatternSpec::word("after"))],
        }
    }
}

/// Register the patterns of every value kind with `engine`.
///
/// Runs once per engine at startup; the engine ignores labels it already
/// knows, so a second call changes nothing.
pub fn install_patterns(engine: &dyn LanguageEngine) {
    for kind in ValueKind::ALL {
        for (label, spec) in kind.patterns() {
            engine.register_pattern(label, spec);
        }
    }
    tracing::debug!(engine = engine.name(), "value patterns installed");
}

/// Yes/no answer bound to a named subject (usually a candidate intent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub name: String,
    pub description: String,
    pub confirmed: bool,
}

impl Confirm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            confirmed: false,
        }
    }

    pub fn question(&self) -> String {
        format!(
            "Do you want to make {} (i.e., {})?",
            self.name, self.description
        )
    }

    /// Record the answer and return it.
    ///
    /// The first affirmative or negative word decides. `false` means the
    /// user declined (or said nothing recognizable), not that verification
    /// failed.
    pub fn verify(&mut self, answer: &str, engine: &dyn LanguageEngine) -> bool {
        self.confirmed = engine
            .match_patterns(answer)
            .into_iter()
            .find(|m| m.label == "CONFIRM" || m.label == "CANCEL")
            .is_some_and(|m| m.label == "CONFIRM");
        self.confirmed
    }

    pub fn generate(&self) -> String {
        format!("Confirmed <{}>", self.confirmed)
    }
}

impl Default for Confirm {
    fn default() -> Self {
        Self::new(
            ValueKind::Confirm.name(),
            ValueKind::Confirm.description(),
        )
    }
}

/// A single answerable parameter with its current payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Endpoint(Option<String>),
    Range(Option<String>),
    Protocol(Option<String>),
    Confirm(Confirm),
    Raw(Option<String>),
    Throughput(Option<String>),
    Before(Option<String>),
    After(Option<String>),
}

impl Value {
    /// Fresh, unanswered value of `kind`.
    pub fn new(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Endpoint => Self::Endpoint(None),
            ValueKind::Range => Self::Range(None),
            ValueKind::Protocol => Self::Protocol(None),
            ValueKind::Confirm => Self::Confirm(Confirm::default()),
            ValueKind::Raw => Self::Raw(None),
            ValueKind::Throughput => Self::Throughput(None),
            ValueKind::Before => Self::Before(None),
            ValueKind::After => Self::After(None),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Endpoint(_) => ValueKind::Endpoint,
            Self::Range(_) => ValueKind::Range,
            Self::Protocol(_) => ValueKind::Protocol,
            Self::Confirm(_) => ValueKind::Confirm,
            Self::Raw(_) => ValueKind::Raw,
            Self::Throughput(_) => ValueKind::Throughput,
            Self::Before(_) => ValueKind::Before,
            Self::After(_) => ValueKind::After,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Confirm(c) => &c.name,
            other => other.kind().name(),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.kind().hint()
    }

    /// Textual payload; `None` for Confirm and for unanswered values.
    pub fn current(&self) -> Option<&str> {
        self.text_slot().and_then(|v| v.as_deref())
    }

    /// Overwrite the textual payload. No-op for Confirm.
    pub fn set_current(&mut self, value: Option<String>) {
        if let Some(slot) = self.text_slot_mut() {
            *slot = value;
        }
    }

    fn text_slot(&self) -> Option<&Option<String>> {
        match self {
            Self::Endpoint(v)
            | Self::Range(v)
            | Self::Protocol(v)
            | Self::Raw(v)
            | Self::Throughput(v)
            | Self::Before(v)
            | Self::After(v) => Some(v),
            Self::Confirm(_) => None,
        }
    }

    fn text_slot_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Endpoint(v)
            | Self::Range(v)
            | Self::Protocol(v)
            | Self::Raw(v)
            | Self::Throughput(v)
            | Self::Before(v)
            | Self::After(v) => Some(v),
            Self::Confirm(_) => None,
        }
    }

    pub fn question(&self) -> String {
        match self {
            Self::Confirm(c) => c.question(),
            other => format!(
                "What's the value for {} (hint: {}).",
                other.name(),
                other.hint().unwrap_or("none")
            ),
        }
    }

    /// Try to take `answer` as this value.
    ///
    /// On a match the payload is replaced and `true` returned; otherwise the
    /// payload is left untouched. Raw concatenates every word-like token.
    /// Confirm returns the recorded yes/no answer instead.
    pub fn verify(&mut self, answer: &str, engine: &dyn LanguageEngine) -> bool {
        let labels = self.kind().pattern_labels();
        match self {
            Self::Confirm(c) => c.verify(answer, engine),
            Self::Raw(v) => {
                let joined: String = engine
                    .match_patterns(answer)
                    .into_iter()
                    .filter(|m| labels.contains(&m.label.as_str()))
                    .map(|m| m.span)
                    .collect();
                if joined.is_empty() {
                    return false;
                }
                *v = Some(joined);
                true
            }
            _ => {
                let hit = engine
                    .match_patterns(answer)
                    .into_iter()
                    .find(|m| labels.contains(&m.label.as_str()));
                match hit {
                    Some(m) => {
                        self.set_current(Some(m.span));
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Canonical expression consumed by the policy compiler.
    pub fn generate(&self) -> String {
        let text = self.current().unwrap_or_default();
        match self {
            Self::Endpoint(_) => format!("endpoint('{text}')"),
            Self::Range(_) => format!("range('{text}')"),
            Self::Protocol(_) => format!("traffic('{text}')"),
            Self::Raw(_) => format!("text('{text}')"),
            Self::Throughput(_) => format!("throughput('{text}')"),
            Self::Before(_) => "before('all')".to_string(),
            Self::After(_) => "after('all')".to_string(),
            Self::Confirm(c) => c.generate(),
        }
    }
}
