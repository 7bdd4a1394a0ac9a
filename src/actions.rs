//! Structured records recovered from a narrative log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Bank,
    Construction,
    Daily,
    Destruction,
    Draftrate,
    Explore,
    Invest,
    Magic,
    Release,
    Rezone,
    Train,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Bank => "bank",
            ActionKind::Construction => "construction",
            ActionKind::Daily => "daily",
            ActionKind::Destruction => "destruction",
            ActionKind::Draftrate => "draftrate",
            ActionKind::Explore => "explore",
            ActionKind::Invest => "invest",
            ActionKind::Magic => "magic",
            ActionKind::Release => "release",
            ActionKind::Rezone => "rezone",
            ActionKind::Train => "train",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type ActionData = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub data: ActionData,
}

impl ParsedAction {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            data: ActionData::new(),
        }
    }

    /// Set `item` to `amount`, replacing an earlier amount for the same item.
    pub fn insert(&mut self, item: impl Into<String>, amount: i64) {
        self.data.insert(item.into(), amount);
    }

    pub fn with(mut self, item: impl Into<String>, amount: i64) -> Self {
        self.insert(item, amount);
        self
    }

    pub fn get(&self, item: &str) -> Option<i64> {
        self.data.get(item).copied()
    }
}

impl fmt::Display for ParsedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind)?;
        for (item, amount) in &self.data {
            write!(f, " {}={}", item, amount)?;
        }
        Ok(())
    }
}

/// Records keyed by zero-based hour, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedLog {
    hours: BTreeMap<usize, Vec<ParsedAction>>,
}

impl ParsedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hour: usize, action: ParsedAction) {
        self.hours.entry(hour).or_default().push(action);
    }

    pub fn hour(&self, hour: usize) -> &[ParsedAction] {
        self.hours.get(&hour).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hours(&self) -> impl Iterator<Item = (usize, &[ParsedAction])> {
        self.hours.iter().map(|(hour, actions)| (*hour, actions.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Total number of records across all hours.
    pub fn len(&self) -> usize {
        self.hours.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let log: Self = serde_json::from_str(&json)?;
        Ok(log)
    }
}
