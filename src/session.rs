use serde::Serialize;
use std::collections::BTreeSet;

/// One known define as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefineRow {
    pub name: String,
    /// Enabled once pending changes are applied
    pub enabled: bool,
    /// Has a pending change
    pub modified: bool,
}

/// Pending enable/disable edits against one group's enabled defines
#[derive(Debug, Clone)]
pub struct DefineSession {
    known: BTreeSet<String>,
    enabled: Vec<String>,
    to_enable: Vec<String>,
    to_disable: Vec<String>,
}

impl DefineSession {
    /// Start a session over the known symbols and the group's current list
    pub fn new(known: BTreeSet<String>, enabled: Vec<String>) -> Self {
        Self {
            known,
            enabled,
            to_enable: Vec::new(),
            to_disable: Vec::new(),
        }
    }

    pub fn enable(&mut self, name: &str) {
        self.to_enable.push(name.to_string());
        remove_first(&mut self.to_disable, name);
    }

    pub fn disable(&mut self, name: &str) {
        self.to_disable.push(name.to_string());
        remove_first(&mut self.to_enable, name);
    }

    /// Request a state; does nothing if the name is already in that state
    pub fn toggle(&mut self, name: &str, on: bool) {
        if on == self.is_set(name) {
            return;
        }

        if on {
            self.enable(name);
        } else {
            self.disable(name);
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        !contains(&self.to_disable, name)
            && (contains(&self.enabled, name) || contains(&self.to_enable, name))
    }

    pub fn is_modified(&self, name: &str) -> bool {
        contains(&self.to_disable, name) || contains(&self.to_enable, name)
    }

    pub fn change_count(&self) -> usize {
        self.to_enable.len() + self.to_disable.len()
    }

    /// Discard pending changes
    pub fn clear(&mut self) {
        self.to_enable.clear();
        self.to_disable.clear();
    }

    pub fn known(&self) -> &BTreeSet<String> {
        &self.known
    }

    pub fn enabled(&self) -> &[String] {
        &self.enabled
    }

    /// Fold pending changes into the enabled list and return it for storage
    pub fn apply(&mut self) -> Vec<String> {
        for name in &self.to_disable {
            remove_first(&mut self.enabled, name);
        }

        for name in self.to_enable.drain(..) {
            if !self.enabled.contains(&name) {
                self.enabled.push(name);
            }
        }

        self.to_disable.clear();
        self.enabled.clone()
    }

    /// One row per known symbol, in name order
    pub fn rows(&self) -> Vec<DefineRow> {
        self.known
            .iter()
            .map(|name| DefineRow {
                name: name.clone(),
                enabled: self.is_set(name),
                modified: self.is_modified(name),
            })
            .collect()
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|n| n == name)
}

fn remove_first(list: &mut Vec<String>, name: &str) {
    if let Some(index) = list.iter().position(|n| n == name) {
        list.remove(index);
    }
}
