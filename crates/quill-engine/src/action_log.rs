//! Append-once verification log.
//!
//! Every interaction records a named boolean outcome. The first observation of
//! a name is authoritative: later records under the same name are reported but
//! never overwrite it.

use quill_common::{QuillError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::panic::Location;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub name: String,
    pub outcome: bool,
}

#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Vec<ActionEntry>,
    index: HashMap<String, usize>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `outcome` under `name` and hand it back, so checks can be
    /// chained inline: `ok &= log.record("x", a == b);`
    #[track_caller]
    pub fn record(&mut self, name: impl Into<String>, outcome: bool) -> bool {
        let name = name.into();
        let caller = Location::caller();
        if !outcome {
            warn!(location = %caller, "check {} failed", name);
        }
        info!("[{}] {}", if outcome { "OK" } else { "FAIL" }, name);

        if !self.index.contains_key(&name) {
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push(ActionEntry { name, outcome });
        }
        outcome
    }

    /// Record a value produced by a page script. Anything but a JSON boolean
    /// is rejected and leaves the log untouched.
    #[track_caller]
    pub fn record_json(&mut self, name: impl Into<String>, outcome: &Value) -> Result<bool> {
        let name = name.into();
        match outcome {
            Value::Bool(b) => Ok(self.record(name, *b)),
            other => Err(QuillError::TypeMismatch {
                name,
                found: other.to_string(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.index.get(name).map(|&i| self.entries[i].outcome)
    }

    /// True iff every recorded outcome is true.
    pub fn summary(&self) -> bool {
        self.entries.iter().all(|e| e.outcome)
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn failures(&self) -> impl Iterator<Item = &ActionEntry> {
        self.entries.iter().filter(|e| !e.outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
