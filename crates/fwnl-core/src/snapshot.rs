//! Positional JSON snapshot of a [`Session`], for stateless transports.
//!
//! ```json
//! {"_data": {"0": "questions",
//!            "1": {"label": "ACL", "commands": [{"name": "Name", "value": 0,
//!                  "values": [{"name": "Text", "value": "myrule"}]}, ...]},
//!            "2": {"name": "From", "value": 0, "values": [...]},
//!            "3": 1}}
//! ```
//!
//! Absent fields are written as `null` and read back from `null` or a missing
//! key. Variants are chosen from the `label`, `name` and `special`
//! discriminators only; anything unrecognized is a [`DecodeError`].

use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandKind};
use crate::error::DecodeError;
use crate::intent::{Intent, IntentKind};
use crate::session::{DialogueState, Prompt, Session};
use crate::values::{Confirm, Value, ValueKind};

const CONFIRM_SPECIAL: &str = "Confirm";

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    #[serde(rename = "_data", default)]
    data: Option<Fields>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Fields {
    #[serde(rename = "0", default)]
    state: Option<String>,
    #[serde(rename = "1", default)]
    intent: Option<IntentWire>,
    #[serde(rename = "2", default)]
    current: Option<NodeWire>,
    #[serde(rename = "3", default)]
    counter: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IntentWire {
    label: String,
    commands: Vec<NodeWire>,
}

/// A command, a value or a Confirm. Which one is decided by the
/// discriminators, never by shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct NodeWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    special: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<NodeWire>>,
}

// ── Encoding ────────────────────────────────────────────────────

/// Snapshot of `session` as a JSON value.
pub fn encode(session: &Session) -> serde_json::Value {
    let snapshot = Snapshot {
        data: Some(Fields {
            state: session.state.as_wire().map(str::to_string),
            intent: session.intent.as_ref().map(intent_wire),
            current: session.current.as_ref().map(|p| match p {
                Prompt::Confirm(c) => confirm_wire(c),
                Prompt::Command(c) => command_wire(c),
            }),
            counter: session.counter,
        }),
    };
    serde_json::to_value(snapshot).unwrap_or(serde_json::Value::Null)
}

/// Snapshot of `session` as a JSON string.
pub fn encode_string(session: &Session) -> String {
    encode(session).to_string()
}

fn intent_wire(intent: &Intent) -> IntentWire {
    IntentWire {
        label: intent.label().to_string(),
        commands: intent.commands.iter().map(command_wire).collect(),
    }
}

fn command_wire(command: &Command) -> NodeWire {
    NodeWire {
        name: Some(command.name().to_string()),
        value: command.selected().into(),
        values: Some(command.values().iter().map(value_wire).collect()),
        ..NodeWire::default()
    }
}

fn value_wire(value: &Value) -> NodeWire {
    match value {
        Value::Confirm(c) => confirm_wire(c),
        other => NodeWire {
            name: Some(other.kind().name().to_string()),
            value: other.current().into(),
            ..NodeWire::default()
        },
    }
}

fn confirm_wire(confirm: &Confirm) -> NodeWire {
    NodeWire {
        special: Some(CONFIRM_SPECIAL.to_string()),
        name: Some(confirm.name.clone()),
        description: Some(confirm.description.clone()),
        value: confirm.confirmed.into(),
        values: None,
    }
}

// ── Decoding ────────────────────────────────────────────────────

/// Restore a session from a JSON string.
pub fn decode(text: &str) -> Result<Session, DecodeError> {
    decode_value(serde_json::from_str(text)?)
}

/// Restore a session from a JSON value.
pub fn decode_value(value: serde_json::Value) -> Result<Session, DecodeError> {
    let snapshot: Snapshot = serde_json::from_value(value)?;
    let fields = snapshot.data.ok_or(DecodeError::MissingField("_data"))?;

    let state = match fields.state.as_deref() {
        None => DialogueState::Idle,
        Some(name) => DialogueState::from_wire(name)
            .ok_or_else(|| DecodeError::UnknownState(name.to_string()))?,
    };
    let intent = fields.intent.map(decode_intent).transpose()?;
    let current = fields.current.map(decode_prompt).transpose()?;

    let session = Session {
        state,
        intent,
        current,
        counter: fields.counter,
    };
    check_consistency(&session)?;
    Ok(session)
}

/// Fields that are each valid on their own must also agree with each other:
/// the prompt kind follows the state, and a command prompt sits at the slot
/// the counter points to.
fn check_consistency(session: &Session) -> Result<(), DecodeError> {
    match (&session.current, session.state) {
        (None, _) => {}
        (Some(Prompt::Confirm(_)), DialogueState::ConfirmIntent) => {}
        (Some(Prompt::Command(_)), DialogueState::Questions) => {}
        (Some(Prompt::Confirm(_)), state) => {
            return Err(DecodeError::Invalid(format!(
                "confirm prompt in state {state:?}"
            )));
        }
        (Some(Prompt::Command(_)), state) => {
            return Err(DecodeError::Invalid(format!(
                "command prompt in state {state:?}"
            )));
        }
    }

    if let (Some(counter), Some(intent)) = (session.counter, &session.intent) {
        let slots = intent.kind.slots();
        let Some(expected) = slots.get(counter) else {
            return Err(DecodeError::Invalid(format!(
                "counter {counter} out of range for {} ({} slots)",
                intent.label(),
                slots.len()
            )));
        };
        if let Some(Prompt::Command(command)) = &session.current
            && command.kind() != *expected
        {
            return Err(DecodeError::Invalid(format!(
                "current command {} is not slot {counter} ({}) of {}",
                command.name(),
                expected.name(),
                intent.label()
            )));
        }
    }

    if session.state == DialogueState::Questions
        && (session.intent.is_none() || session.counter.is_none() || session.current.is_none())
    {
        return Err(DecodeError::Invalid(
            "questions state needs an intent, a counter and a command".into(),
        ));
    }
    Ok(())
}

fn decode_intent(wire: IntentWire) -> Result<Intent, DecodeError> {
    let kind =
        IntentKind::from_label(&wire.label).ok_or(DecodeError::UnknownIntent(wire.label))?;
    let commands = wire
        .commands
        .into_iter()
        .map(decode_command)
        .collect::<Result<Vec<_>, _>>()?;
    let declared: Vec<CommandKind> = commands.iter().map(Command::kind).collect();
    if declared != kind.slots() {
        return Err(DecodeError::Invalid(format!(
            "slots of {} do not match its template",
            kind.label()
        )));
    }
    Ok(Intent { kind, commands })
}

fn decode_prompt(wire: NodeWire) -> Result<Prompt, DecodeError> {
    if wire.special.is_some() {
        return decode_confirm(wire).map(Prompt::Confirm);
    }
    decode_command(wire).map(Prompt::Command)
}

fn decode_command(wire: NodeWire) -> Result<Command, DecodeError> {
    let name = wire.name.ok_or(DecodeError::MissingField("name"))?;
    let kind = CommandKind::from_name(&name).ok_or(DecodeError::UnknownCommand(name))?;
    let selected = match &wire.value {
        serde_json::Value::Null => 0,
        other => other
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| DecodeError::Invalid(format!("selected index of {}", kind.name())))?,
    };
    let values = wire
        .values
        .ok_or(DecodeError::MissingField("values"))?
        .into_iter()
        .map(decode_value_node)
        .collect::<Result<Vec<_>, _>>()?;
    Command::from_parts(kind, values, selected).ok_or_else(|| {
        DecodeError::Invalid(format!(
            "alternatives or selected index of {}",
            kind.name()
        ))
    })
}

fn decode_value_node(wire: NodeWire) -> Result<Value, DecodeError> {
    if wire.special.is_some() {
        return decode_confirm(wire).map(Value::Confirm);
    }
    let name = wire.name.ok_or(DecodeError::MissingField("name"))?;
    let kind = ValueKind::from_name(&name).ok_or(DecodeError::UnknownValue(name))?;
    let current = match wire.value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        _ => {
            return Err(DecodeError::Invalid(format!(
                "value of {} must be a string",
                kind.name()
            )));
        }
    };
    let mut value = Value::new(kind);
    value.set_current(current);
    Ok(value)
}

fn decode_confirm(wire: NodeWire) -> Result<Confirm, DecodeError> {
    match wire.special.as_deref() {
        Some(CONFIRM_SPECIAL) => {}
        Some(other) => return Err(DecodeError::UnknownValue(other.to_string())),
        None => return Err(DecodeError::MissingField("special")),
    }
    let confirmed = match wire.value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => b,
        _ => return Err(DecodeError::Invalid("confirm value must be a boolean".into())),
    };
    let mut confirm = Confirm::default();
    if let Some(name) = wire.name {
        confirm.name = name;
    }
    if let Some(description) = wire.description {
        confirm.description = description;
    }
    confirm.confirmed = confirmed;
    Ok(confirm)
}
