// SPDX-License-Identifier: MPL-2.0
//! User presets, persisted as JSON.
//!
//! Presets are a flat name-to-value map stored in `presets.json`. A missing
//! file yields an empty preset set; a malformed file is a configuration
//! error rather than silent data loss.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Default preset file name, looked up in the working directory.
pub const PRESET_FILE: &str = "presets.json";

/// A named collection of user preset values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presets {
    #[serde(flatten)]
    values: serde_json::Map<String, Value>,
}

impl Presets {
    /// Loads presets from [`PRESET_FILE`] in the working directory. A
    /// missing file yields empty presets.
    pub fn load() -> Result<Self> {
        Self::load_from_path(Path::new(PRESET_FILE))
    }

    /// Loads presets from the given path. A missing file yields empty
    /// presets; a malformed file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let presets = serde_json::from_str(&contents)?;
        Ok(presets)
    }

    /// Saves presets to [`PRESET_FILE`] in the working directory.
    pub fn save(&self) -> Result<()> {
        self.save_to_path(Path::new(PRESET_FILE))
    }

    /// Saves presets to the given path, creating parent directories as
    /// needed.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reads a preset value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stores a preset value under a name, replacing any previous value.
    pub fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Removes a preset by name. Returns the removed value, if any.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Iterates over preset names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}
