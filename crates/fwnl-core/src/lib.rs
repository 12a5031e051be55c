//! Dialogue core for FWNL.
//!
//! Turns a free-text network-policy request into a configuration command
//! through a guided question-and-answer dialogue: intent matching, slot
//! verification against typed value patterns, defaults, final generation,
//! and a positional JSON snapshot of the per-conversation session.

pub mod command;
pub mod dialogue;
pub mod distance;
pub mod engine;
pub mod error;
pub mod intent;
pub mod matcher;
pub mod mock;
pub mod session;
pub mod snapshot;
pub mod values;

// Re-export key types for convenience
pub use command::{Command, CommandKind};
pub use dialogue::Assistant;
pub use engine::{LanguageEngine, RuleEngine};
pub use error::{DecodeError, VerificationFailure};
pub use intent::{Intent, IntentKind};
pub use matcher::Match;
pub use mock::ScriptedEngine;
pub use session::{DialogueState, Prompt, Session};
pub use values::{Confirm, Value, ValueKind};
