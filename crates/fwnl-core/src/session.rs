//! Per-conversation dialogue state.

use crate::command::Command;
use crate::intent::Intent;
use crate::values::Confirm;

/// Where a conversation is in the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueState {
    #[default]
    Idle,
    ConfirmIntent,
    Questions,
    NextCommand,
}

impl DialogueState {
    /// Wire name; Idle has none.
    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::ConfirmIntent => Some("confirm_intent"),
            Self::Questions => Some("questions"),
            Self::NextCommand => Some("next_command"),
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "confirm_intent" => Some(Self::ConfirmIntent),
            "questions" => Some(Self::Questions),
            "next_command" => Some(Self::NextCommand),
            _ => None,
        }
    }
}

/// The question currently awaiting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// "Is this the intent you meant?"
    Confirm(Confirm),
    /// A slot of the selected intent.
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub state: DialogueState,
    pub intent: Option<Intent>,
    pub current: Option<Prompt>,
    pub counter: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; the session is Idle again.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.state == DialogueState::Idle
    }
}
