//! Intent templates: a labelled, ordered script of slots.

use crate::command::{Command, CommandKind};
use crate::engine::EntityRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Acl,
    TrafficShaping,
}

impl IntentKind {
    pub const ALL: [IntentKind; 2] = [Self::Acl, Self::TrafficShaping];

    pub fn label(self) -> &'static str {
        match self {
            Self::Acl => "ACL",
            Self::TrafficShaping => "TS",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Acl => "Access Control List",
            Self::TrafficShaping => "Traffic Shaping",
        }
    }

    pub fn slots(self) -> &'static [CommandKind] {
        match self {
            Self::Acl => &[
                CommandKind::Name,
                CommandKind::From,
                CommandKind::To,
                CommandKind::Block,
                CommandKind::Order,
            ],
            Self::TrafficShaping => &[
                CommandKind::Name,
                CommandKind::From,
                CommandKind::To,
                CommandKind::Order,
                CommandKind::For,
                CommandKind::With,
            ],
        }
    }

    /// Token rule that recognizes a request for this intent.
    pub fn entity_rule(self) -> EntityRule {
        let rule = EntityRule::new(self.label()).optional_word("want");
        match self {
            Self::Acl => rule.word("access").in_list(&["filter", "block", "manage"]),
            Self::TrafficShaping => rule
                .word("traffic")
                .in_list(&["shape", "limit", "reduce", "cap"]),
        }
    }

    /// Literal words of the entity rule, in rule order.
    pub fn keywords(self) -> Vec<String> {
        self.entity_rule().keywords()
    }
}

/// An instantiated template with its slots' current answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub kind: IntentKind,
    pub commands: Vec<Command>,
}

impl Intent {
    pub fn new(kind: IntentKind) -> Self {
        Self {
            kind,
            commands: kind.slots().iter().map(|k| Command::new(*k)).collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn question(&self) -> String {
        format!(
            "Great. So, let me help you with {}. Let me ask you some questions...",
            self.label()
        )
    }

    /// Final configuration text, lower-cased.
    pub fn generate(&self) -> String {
        let mut out = format!("define intent {}:\n", self.label());
        for command in &self.commands {
            out.push_str(&command.generate());
        }
        out.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleEngine;
    use crate::values::install_patterns;

    #[test]
    fn keywords_include_optional_words() {
        assert_eq!(
            IntentKind::Acl.keywords(),
            vec!["want", "access", "filter", "block", "manage"]
        );
        assert_eq!(
            IntentKind::TrafficShaping.keywords(),
            vec!["want", "traffic", "shape", "limit", "reduce", "cap"]
        );
    }

    #[test]
    fn labels_round_trip() {
        for kind in IntentKind::ALL {
            assert_eq!(IntentKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(IntentKind::from_label("acl"), None);
    }

    #[test]
    fn new_intent_has_one_command_per_slot() {
        let ts = Intent::new(IntentKind::TrafficShaping);
        let names: Vec<&str> = ts.commands.iter().map(Command::name).collect();
        assert_eq!(names, vec!["Name", "From", "To", "Order", "For", "With"]);
    }

    #[test]
    fn generate_lowercases_whole_block() {
        let e = RuleEngine::new();
        install_patterns(&e);
        let mut acl = Intent::new(IntentKind::Acl);
        for (cmd, answer) in acl
            .commands
            .iter_mut()
            .zip(["MyRule", "10.0.0.0/24", "Server", "FTP", "before"])
        {
            cmd.verify(answer, &e).unwrap();
        }
        assert_eq!(
            acl.generate(),
            "define intent acl:\n\
             \t\tname text('myrule')\n\
             \t\tfrom range('10.0.0.0/24')\n\
             \t\tto endpoint('server')\n\
             \t\tblock traffic('ftp')\n\
             \t\torder before('all')\n"
        );
    }

    #[test]
    fn question_names_label() {
        assert_eq!(
            Intent::new(IntentKind::Acl).question(),
            "Great. So, let me help you with ACL. Let me ask you some questions..."
        );
    }
}
