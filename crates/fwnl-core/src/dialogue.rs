//! Turn-by-turn dialogue driver.
//!
//! [`Assistant`] owns the language engine and the template list. Every call
//! takes the caller's [`Session`] by `&mut` and returns the replies to show;
//! transports decide how to deliver them and how to serialize sessions.

use std::sync::Arc;

use crate::engine::LanguageEngine;
use crate::intent::{Intent, IntentKind};
use crate::matcher::{self, Match};
use crate::session::{DialogueState, Prompt, Session};
use crate::values::{self, Confirm};

pub const WELCOME: &str = "Welcome to the FWNL chat bot!\n\
                           Please, say what you want to do, or '/help' to see the commands list.";
pub const DECLINED: &str = "Ok, we will not do that.";
pub const FINAL: &str = "Here's your final configuration:";
pub const CANCELLED: &str = "Ok, cancelled.";
pub const CANNOT_SKIP: &str = "You can't skip this question.";
pub const NOTHING_TO_SKIP: &str = "There is nothing to skip.";
pub const NO_INTENTS: &str = "Sorry, there are no intents available.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Try /help.";

pub struct Assistant {
    engine: Arc<dyn LanguageEngine>,
    templates: Vec<IntentKind>,
}

impl Assistant {
    /// Build an assistant over every known template.
    pub fn new(engine: Arc<dyn LanguageEngine>) -> Self {
        Self::with_templates(engine, IntentKind::ALL.to_vec())
    }

    /// Build an assistant over `templates`, in scoring order.
    ///
    /// Installs value patterns and entity rules on the engine.
    pub fn with_templates(engine: Arc<dyn LanguageEngine>, templates: Vec<IntentKind>) -> Self {
        values::install_patterns(engine.as_ref());
        matcher::install_entities(engine.as_ref(), &templates);
        tracing::info!(
            engine = engine.name(),
            templates = templates.len(),
            "assistant ready"
        );
        Self { engine, templates }
    }

    pub fn templates(&self) -> &[IntentKind] {
        &self.templates
    }

    pub fn engine(&self) -> &dyn LanguageEngine {
        self.engine.as_ref()
    }

    /// Best template for `text`.
    pub fn closest(&self, text: &str) -> Option<Match> {
        matcher::closest(text, &self.templates, self.engine.as_ref())
    }

    /// Advance the dialogue with one user message.
    pub fn process(&self, text: &str, session: &mut Session) -> Vec<String> {
        let mut replies = Vec::new();
        tracing::debug!(state = ?session.state, "processing message");

        match session.state {
            DialogueState::Idle => {
                let Some(found) = self.closest(text) else {
                    replies.push(NO_INTENTS.to_string());
                    return replies;
                };
                tracing::info!(intent = found.intent.label(), score = found.score, "intent chosen");
                let intent = Intent::new(found.intent);
                let confirm = Confirm::new(intent.label(), intent.description());
                replies.push(confirm.question());
                session.intent = Some(intent);
                session.current = Some(Prompt::Confirm(confirm));
                session.state = DialogueState::ConfirmIntent;
                return replies;
            }
            DialogueState::ConfirmIntent => {
                let confirmed = match session.current.as_mut() {
                    Some(Prompt::Confirm(confirm)) => confirm.verify(text, self.engine.as_ref()),
                    _ => false,
                };
                let first = session
                    .intent
                    .as_ref()
                    .and_then(|i| i.commands.first().map(|c| (i.question(), c.clone())));
                match first {
                    Some((intro, command)) if confirmed => {
                        replies.push(intro);
                        replies.push(command.question());
                        session.current = Some(Prompt::Command(command));
                        session.counter = Some(0);
                        session.state = DialogueState::Questions;
                    }
                    _ => {
                        replies.push(DECLINED.to_string());
                        session.clear();
                    }
                }
                return replies;
            }
            DialogueState::Questions => {
                let (Some(Prompt::Command(command)), Some(counter), Some(intent)) = (
                    session.current.as_mut(),
                    session.counter,
                    session.intent.as_mut(),
                ) else {
                    tracing::warn!("inconsistent session in questions state, resetting");
                    session.clear();
                    return replies;
                };
                let Some(slot) = intent.commands.get_mut(counter) else {
                    tracing::warn!(counter, "slot counter out of range, resetting");
                    session.clear();
                    return replies;
                };
                match command.verify(text, self.engine.as_ref()) {
                    Ok(ack) => {
                        replies.push(ack);
                        *slot = command.clone();
                        session.state = DialogueState::NextCommand;
                    }
                    Err(failure) => {
                        replies.push(failure.to_string());
                        return replies;
                    }
                }
            }
            DialogueState::NextCommand => {}
        }

        self.next_command(session, &mut replies);
        replies
    }

    /// Accept the current slot's default, if it has one.
    pub fn skip(&self, session: &mut Session) -> Vec<String> {
        if session.state != DialogueState::Questions {
            return vec![NOTHING_TO_SKIP.to_string()];
        }
        let (Some(Prompt::Command(command)), Some(counter), Some(intent)) = (
            session.current.as_mut(),
            session.counter,
            session.intent.as_mut(),
        ) else {
            return vec![NOTHING_TO_SKIP.to_string()];
        };
        let Some(slot) = intent.commands.get_mut(counter) else {
            tracing::warn!(counter, "slot counter out of range, resetting");
            session.clear();
            return vec![NOTHING_TO_SKIP.to_string()];
        };
        if !command.apply_default() {
            return vec![CANNOT_SKIP.to_string()];
        }
        tracing::debug!(slot = command.name(), "slot skipped with default");
        *slot = command.clone();
        session.state = DialogueState::NextCommand;
        let mut replies = Vec::new();
        self.next_command(session, &mut replies);
        replies
    }

    /// Drop the conversation, whatever state it is in.
    pub fn cancel(&self, session: &mut Session) -> Vec<String> {
        session.clear();
        vec![CANCELLED.to_string()]
    }

    /// Route a raw user message, handling slash commands.
    pub fn handle(&self, text: &str, session: &mut Session) -> Vec<String> {
        let text = text.trim().to_lowercase();
        let Some(command) = text.strip_prefix('/') else {
            return self.process(&text, session);
        };
        match command {
            "start" => vec![WELCOME.to_string()],
            "help" => vec![self.help()],
            "cancel" => self.cancel(session),
            "skip" => self.skip(session),
            other => match self
                .templates
                .iter()
                .find(|k| k.label().eq_ignore_ascii_case(other))
            {
                Some(kind) => {
                    session.clear();
                    self.process(kind.description(), session)
                }
                None => vec![UNKNOWN_COMMAND.to_string()],
            },
        }
    }

    pub fn help(&self) -> String {
        let mut msg = String::from("These are the available commands:\n");
        msg.push_str("/help - show the command list\n");
        msg.push_str("/skip - use the default for the current question\n");
        msg.push_str("/cancel - forget the current intent\n");
        for kind in &self.templates {
            msg.push_str(&format!(
                "/{} - create {}\n",
                kind.label().to_lowercase(),
                kind.description()
            ));
        }
        msg
    }

    fn next_command(&self, session: &mut Session, replies: &mut Vec<String>) {
        let Some(intent) = session.intent.as_ref() else {
            session.clear();
            return;
        };
        let next = session.counter.map_or(0, |c| c + 1);
        match intent.commands.get(next) {
            Some(command) => {
                replies.push(command.question());
                session.current = Some(Prompt::Command(command.clone()));
                session.counter = Some(next);
                session.state = DialogueState::Questions;
            }
            None => {
                tracing::info!(intent = intent.label(), "intent completed");
                replies.push(FINAL.to_string());
                replies.push(intent.generate());
                session.clear();
            }
        }
    }
}
