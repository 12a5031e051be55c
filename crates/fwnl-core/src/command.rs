//! Slots of an intent template.
//!
//! A [`Command`] is one named parameter. It holds its alternatives as
//! [`Value`]s and remembers which one the user's answer selected.

use uuid::Uuid;

use crate::engine::LanguageEngine;
use crate::error::VerificationFailure;
use crate::values::{Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    From,
    To,
    Block,
    Name,
    With,
    Order,
    For,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        Self::From,
        Self::To,
        Self::Block,
        Self::Name,
        Self::With,
        Self::Order,
        Self::For,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
            Self::Block => "Block",
            Self::Name => "Name",
            Self::With => "With",
            Self::Order => "Order",
            Self::For => "For",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::From => "Source address/machine",
            Self::To => "Destination address/machine",
            Self::Block => "Traffic protocol",
            Self::Name => "Name to be used",
            Self::With => "Metrics to be used",
            Self::Order => "Intent priority",
            Self::For => "Intended traffic",
        }
    }

    /// Declared alternatives, in the order answers are tried.
    pub fn alternatives(self) -> &'static [ValueKind] {
        match self {
            Self::From | Self::To => &[ValueKind::Endpoint, ValueKind::Range],
            Self::Block | Self::For => &[ValueKind::Protocol],
            Self::Name => &[ValueKind::Raw],
            Self::With => &[ValueKind::Throughput],
            Self::Order => &[ValueKind::Before, ValueKind::After],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    values: Vec<Value>,
    selected: usize,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            values: kind.alternatives().iter().map(|k| Value::new(*k)).collect(),
            selected: 0,
        }
    }

    /// Rebuild a command from decoded parts.
    ///
    /// Returns `None` when `values` do not line up with the declared
    /// alternatives or `selected` is out of range.
    pub(crate) fn from_parts(kind: CommandKind, values: Vec<Value>, selected: usize) -> Option<Self> {
        let declared = kind.alternatives();
        let consistent = values.len() == declared.len()
            && values.iter().zip(declared).all(|(v, k)| v.kind() == *k);
        (consistent && selected < values.len()).then_some(Self {
            kind,
            values,
            selected,
        })
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_value(&self) -> &Value {
        &self.values[self.selected]
    }

    /// Alternative names joined by `|`.
    pub fn hint(&self) -> String {
        self.values
            .iter()
            .map(Value::name)
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn question(&self) -> String {
        format!(
            "Regarding the property {}. What do you want to use as its value? Hint: {}",
            self.name(),
            self.hint()
        )
    }

    /// Offer `answer` to each alternative in order; the first that accepts
    /// it becomes the selection. Returns the acknowledgement to show.
    pub fn verify(
        &mut self,
        answer: &str,
        engine: &dyn LanguageEngine,
    ) -> Result<String, VerificationFailure> {
        for (i, value) in self.values.iter_mut().enumerate() {
            if value.verify(answer, engine) {
                self.selected = i;
                return Ok(format!("I got it: {}", value.generate()));
            }
        }
        Err(VerificationFailure)
    }

    /// Fill the slot without asking. `false` when the slot has no default.
    pub fn apply_default(&mut self) -> bool {
        match self.kind {
            CommandKind::Name => {
                let id = Uuid::now_v7().simple().to_string();
                self.values[0].set_current(Some(format!("tmp{}", &id[id.len() - 8..])));
                self.selected = 0;
                true
            }
            CommandKind::Order => {
                self.selected = 1;
                true
            }
            _ => false,
        }
    }

    /// One line of the generated intent, `\t\t<name> <expr>\n`.
    pub fn generate(&self) -> String {
        format!("\t\t{} {}\n", self.name(), self.selected_value().generate())
    }
}
