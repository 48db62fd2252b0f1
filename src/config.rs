//! Machine configuration.
//!
//! Configuration is a plain serde value so embedding applications can load
//! it from whatever config source they already use.

use serde::{Deserialize, Serialize};

/// Settings shared by the reducer machine and the transition engine.
///
/// # Example
///
/// ```rust
/// use statecraft::MachineConfig;
///
/// let config = MachineConfig::default()
///     .with_label("player")
///     .with_history_limit(100);
///
/// assert_eq!(config.label, "player");
/// assert_eq!(config.history_limit, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name attached to every log line the machine emits
    pub label: String,

    /// Keep a transition history (transition engine only)
    pub record_history: bool,

    /// Maximum number of history records kept; oldest are dropped first
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: "machine".to_string(),
            record_history: true,
            history_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }
}
